mod api;
mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::Context;
use api::{ApiClient, ApiConfig};
use app::GeneVisionApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ApiConfig::from_env();
    let client = ApiClient::new(&config).context("configuring the API client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Gene Vision – Expression Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(GeneVisionApp::new(client)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the viewer: {e}"))
}
