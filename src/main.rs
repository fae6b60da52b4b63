mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use app::WeatherDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // A broken config file should not keep the dashboard from starting.
    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {e:#}");
        DashboardConfig::default()
    });
    log::info!("Data source: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IND320 • Weather mini-app",
        options,
        Box::new(|_cc| Ok(Box::new(WeatherDashApp::new(config)))),
    )
}
