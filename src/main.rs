mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use anyhow::{anyhow, Context};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().context("loading dashboard configuration")?;
    let data_path = config.data_path.clone();

    // Without data there is nothing to show, so a failed load ends startup.
    let mut state = AppState::new(config);
    if let Err(e) = state.open(&data_path) {
        log::error!("Cannot start without a dataset: {e}");
        return Err(e).with_context(|| format!("loading dataset {}", data_path.display()));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Product Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
