mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use std::path::Path;

use app::SpotifyExplorerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config::APP_TITLE)
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_TITLE,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(app::spotify_visuals());
            Ok(Box::new(SpotifyExplorerApp::new(Path::new(
                config::DEFAULT_DATA_PATH,
            ))))
        }),
    )
}
