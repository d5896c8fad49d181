//! Australian Suburbs Map desktop application.

mod app;
mod landing;
mod logger;
mod map;
mod map_view;
mod overlay;

use anyhow::Context as _;
use galileo::control::UserEventHandler;
use galileo_egui::EguiMapState;
use suburbs::config::CONFIG_FILE_NAME;
use suburbs::AppConfig;

use crate::app::SuburbsApp;

const WINDOW_TITLE: &str = "Australian Suburbs Map";

fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let config = AppConfig::load_or_default(CONFIG_FILE_NAME);
    log::debug!("Using configuration {config:?}");

    // Tile loading spawns onto the ambient tokio runtime.
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let map = map::create_map(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let render_state = cc
                .wgpu_render_state
                .clone()
                .ok_or("wgpu render state is not available")?;
            let handlers: Vec<Box<dyn UserEventHandler>> = Vec::new();
            let map_state = EguiMapState::new(map, cc.egui_ctx.clone(), render_state, handlers);

            Ok(Box::new(SuburbsApp::new(config, map_state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application failed: {e}"))
}
