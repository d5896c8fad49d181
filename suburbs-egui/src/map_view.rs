//! Map view: search bar, suburb overlay, popups and notices.

use egui::{Context, Frame, Id, Key, Pos2, Rect, Sense, TextEdit};
use galileo::Map;
use galileo_egui::{EguiMap, EguiMapState};
use suburbs::{
    AppConfig, LoadState, MapViewModel, OverlayStyle, PendingLoad, SearchOutcome, ViewportHandle,
};

use crate::map::GalileoViewport;
use crate::overlay;

/// What the map view asks the application to do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapViewAction {
    /// Nothing.
    None,
    /// Navigate back to the landing view.
    Back,
}

/// State of the map view. Created when the view is entered and dropped when it is left.
pub(crate) struct MapView {
    model: MapViewModel,
    pending: Option<PendingLoad>,
    style: OverlayStyle,
    overlay_revision: Option<u64>,
    popup_anchor: Option<Pos2>,
}

impl MapView {
    /// Resets the map to the initial viewport and starts loading the dataset.
    pub(crate) fn mount(config: &AppConfig, ctx: &Context, map: &mut Map) -> Self {
        let initial = config.initial_viewport();
        GalileoViewport::new(map).set_viewport(&initial);

        log::info!("Loading suburbs from {}", config.dataset);
        let repaint_ctx = ctx.clone();
        let pending = PendingLoad::spawn(config.dataset.loader(), move || {
            repaint_ctx.request_repaint()
        });

        Self {
            model: MapViewModel::new(config.attributes.clone()),
            pending: Some(pending),
            style: config.style,
            overlay_revision: None,
            popup_anchor: None,
        }
    }

    /// Removes everything the view added to the map.
    pub(crate) fn unmount(self, map: &mut Map) {
        overlay::clear_overlay(map);
        map.redraw();
        log::debug!("Map view closed");
    }

    /// Draws one frame of the view.
    pub(crate) fn show(&mut self, ctx: &Context, map_state: &mut EguiMapState) -> MapViewAction {
        self.poll_load();

        let mut action = MapViewAction::None;
        egui::TopBottomPanel::top("map-toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Australian Suburbs Map");
            ui.horizontal(|ui| {
                if ui.button("⬅ Back").clicked() {
                    action = MapViewAction::Back;
                }
                ui.separator();

                let input = ui.add(
                    TextEdit::singleline(self.model.query_mut())
                        .hint_text("Search suburb")
                        .desired_width(240.0),
                );
                let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                if ui.button("Search").clicked() || submitted {
                    self.search(map_state.map_mut());
                }

                match self.model.load_state() {
                    LoadState::Pending => {
                        ui.spinner();
                        ui.label("Loading suburbs…");
                    }
                    LoadState::Loaded => {
                        ui.label(format!(
                            "{} of {} suburbs shown",
                            self.model.filtered().len(),
                            self.model.full().len()
                        ));
                    }
                    LoadState::Failed => {}
                }
            });
            ui.add_space(4.0);
        });

        self.sync_overlay(map_state.map_mut());

        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                EguiMap::new(map_state).show_ui(ui);

                let clicks = ui.interact(rect, Id::new("suburb-clicks"), Sense::click());
                if clicks.clicked() {
                    if let Some(pos) = clicks.interact_pointer_pos() {
                        self.click(map_state.map_mut(), rect, pos);
                    }
                }
            });

        self.show_popup(ctx);
        self.show_notice(ctx);

        action
    }

    fn poll_load(&mut self) {
        let Some(pending) = &mut self.pending else {
            return;
        };

        if let Some(result) = pending.poll() {
            self.model.finish_load(result);
            self.pending = None;
        }
    }

    fn search(&mut self, map: &mut Map) {
        let mut viewport = Some(GalileoViewport::new(map)).filter(|v| !v.size().is_empty());

        let outcome = self
            .model
            .search(viewport.as_mut().map(|v| v as &mut dyn ViewportHandle));

        if let SearchOutcome::Focused { matches, .. } = outcome {
            log::info!("Showing {matches} suburbs for {:?}", self.model.query());
            self.popup_anchor = None;
        }
    }

    fn sync_overlay(&mut self, map: &mut Map) {
        let revision = self.model.revision();
        if self.overlay_revision == Some(revision) {
            return;
        }

        overlay::replace_overlay(map, self.model.filtered(), &self.style);
        self.overlay_revision = Some(revision);
    }

    fn click(&mut self, map: &mut Map, rect: Rect, pos: Pos2) {
        let offset = map_offset(rect, pos);
        let Some(position) = GalileoViewport::new(map).position_at(offset[0], offset[1]) else {
            return;
        };
        log::trace!("Click at {position:?}");

        match self.model.open_popup_at(position.longitude, position.latitude) {
            Some(_) => self.popup_anchor = Some(pos),
            None => self.popup_anchor = None,
        }
    }

    fn show_popup(&mut self, ctx: &Context) {
        let Some(popup) = self.model.popup() else {
            return;
        };

        let mut open = true;
        let mut window = egui::Window::new(format!("Suburb: {}", popup.title))
            .id(Id::new("suburb-popup"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false);
        if let Some(anchor) = self.popup_anchor {
            window = window.default_pos(anchor);
        }

        window.show(ctx, |ui| {
            egui::Grid::new("suburb-popup-fields")
                .num_columns(2)
                .show(ui, |ui| {
                    for (label, value) in popup.rows() {
                        ui.strong(format!("{label}:"));
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });

        if !open {
            self.model.close_popup();
            self.popup_anchor = None;
        }
    }

    fn show_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.model.notice() else {
            return;
        };

        let response = egui::Modal::new(Id::new("search-notice")).show(ctx, |ui| {
            ui.label(notice);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
        });

        if response.inner || response.should_close() {
            self.model.dismiss_notice();
        }
    }
}

/// Offset of a pointer position from the top left corner of the map, in egui points.
///
/// `galileo-egui` sizes the map in points, so the offset is used as is whatever the display
/// scale factor.
fn map_offset(rect: Rect, pos: Pos2) -> [f64; 2] {
    let offset = pos - rect.min;
    [offset.x as f64, offset.y as f64]
}
