//! Welcome screen.

use egui::{Button, Color32, Context, Frame, Margin, RichText, Ui};

const BACKGROUND: Color32 = Color32::from_rgb(36, 42, 46);
const BUTTON: Color32 = Color32::from_rgb(0x00, 0x7b, 0xff);
const BUTTON_HOVER: Color32 = Color32::from_rgb(0x00, 0x56, 0xb3);

/// Fade-in time of the title, seconds.
const TITLE_FADE_IN: f64 = 0.4;
/// Fade-in time of the subtitle, seconds.
const SUBTITLE_FADE_IN: f64 = 0.9;
/// Vertical distance the headings slide up while fading in, points.
const FADE_IN_OFFSET: f32 = 20.0;

/// Static landing view with a single "Go to Map" button.
#[derive(Default)]
pub(crate) struct LandingView {
    shown_at: Option<f64>,
    button_hovered: bool,
}

impl LandingView {
    /// Restarts the heading animation next time the view is shown.
    pub(crate) fn reset(&mut self) {
        self.shown_at = None;
        self.button_hovered = false;
    }

    /// Draws the view. Returns `true` when the user asked to open the map.
    pub(crate) fn show(&mut self, ctx: &Context) -> bool {
        let now = ctx.input(|i| i.time);
        let shown_at = *self.shown_at.get_or_insert(now);
        let elapsed = now - shown_at;

        let mut go_to_map = false;
        egui::CentralPanel::default()
            .frame(
                Frame::NONE
                    .fill(BACKGROUND)
                    .inner_margin(Margin::symmetric(80, 40)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);

                    fading(ui, elapsed, TITLE_FADE_IN, |ui| {
                        ui.label(
                            RichText::new("Welcome to the Australian Suburbs Map")
                                .size(48.0)
                                .color(Color32::WHITE)
                                .strong(),
                        );
                    });
                    ui.add_space(24.0);

                    fading(ui, elapsed, SUBTITLE_FADE_IN, |ui| {
                        ui.label(
                            RichText::new(
                                "Explore the map to view detailed information about Australian suburbs.",
                            )
                            .size(24.0)
                            .color(Color32::WHITE),
                        );
                    });
                    ui.add_space(60.0);

                    let fill = if self.button_hovered { BUTTON_HOVER } else { BUTTON };
                    let button = Button::new(
                        RichText::new("Go to Map").size(16.0).color(Color32::WHITE),
                    )
                    .fill(fill)
                    .corner_radius(5.0)
                    .min_size(egui::vec2(120.0, 40.0));

                    let response = ui.add(button);
                    self.button_hovered = response.hovered();
                    go_to_map = response.clicked();
                });
            });

        if elapsed < SUBTITLE_FADE_IN {
            ctx.request_repaint();
        }

        go_to_map
    }
}

/// Draws `add_contents` with opacity rising from 0 to 1 and a slide up over `duration` seconds.
fn fading(ui: &mut Ui, elapsed: f64, duration: f64, add_contents: impl FnOnce(&mut Ui)) {
    let progress = (elapsed / duration).clamp(0.0, 1.0) as f32;
    ui.add_space(FADE_IN_OFFSET * (1.0 - progress));
    ui.scope(|ui| {
        ui.set_opacity(progress);
        add_contents(ui);
    });
    ui.add_space(FADE_IN_OFFSET * progress);
}
