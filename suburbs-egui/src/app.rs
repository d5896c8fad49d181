use eframe::App;
use galileo_egui::EguiMapState;
use suburbs::{AppConfig, Navigator, Route};

use crate::landing::LandingView;
use crate::map_view::{MapView, MapViewAction};

/// Top level application: switches between the landing view and the map view.
pub(crate) struct SuburbsApp {
    config: AppConfig,
    map: EguiMapState,
    navigator: Navigator,
    landing: LandingView,
    map_view: Option<MapView>,
}

impl SuburbsApp {
    pub(crate) fn new(config: AppConfig, map: EguiMapState) -> Self {
        Self {
            config,
            map,
            navigator: Navigator::default(),
            landing: LandingView::default(),
            map_view: None,
        }
    }

    fn open_map(&mut self, ctx: &egui::Context) {
        if !self.navigator.go_to_map() {
            return;
        }

        log::info!("Opening map view");
        self.map_view = Some(MapView::mount(&self.config, ctx, self.map.map_mut()));
    }

    fn close_map(&mut self) {
        if !self.navigator.go_back() {
            return;
        }

        log::info!("Back to landing view");
        if let Some(view) = self.map_view.take() {
            view.unmount(self.map.map_mut());
        }
        self.landing.reset();
    }
}

impl App for SuburbsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.navigator.route() {
            Route::Landing => {
                if self.landing.show(ctx) {
                    self.open_map(ctx);
                }
            }
            Route::Map => {
                let action = match &mut self.map_view {
                    Some(view) => view.show(ctx, &mut self.map),
                    None => MapViewAction::Back,
                };

                if action == MapViewAction::Back {
                    self.close_map();
                }
            }
        }
    }
}
