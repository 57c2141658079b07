mod app;
mod controller;
mod data;
mod error;
mod fit;
mod selection;
mod settings;
mod state;
mod ui;

use app::RustyBaselineApp;
use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Baseline – Interactive Data Plotter",
        options,
        Box::new(|_cc| Ok(Box::new(RustyBaselineApp::new(settings)))),
    )
}
