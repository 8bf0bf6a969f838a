mod app;
mod color;
mod config;
mod data;
mod recommend;
mod state;
mod ui;

use std::path::PathBuf;

use app::JobTrendsApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e:#}");
            std::process::exit(2);
        }
    };

    // A path on the command line wins over JOB_DATA_PATH.
    let data_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_path.clone());

    let mut state = AppState::new(config);
    state.load_path(&data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IT Skills and Salary Trends",
        options,
        Box::new(|_cc| Ok(Box::new(JobTrendsApp::new(state)))),
    )
}
