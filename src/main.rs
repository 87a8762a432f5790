use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use eframe::{egui, CreationContext};
use tracing::info;

use inventory_reports::app::{Dispatcher, InventoryApp, NativeDialogs, SaveToDisk};
use inventory_reports::client::ReportClient;
use inventory_reports::config::Args;
use inventory_reports::logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init(args.verbose).map_err(|e| eyre!("failed to set up logging: {e}"))?;
    let config = args.into_config()?;
    info!(
        api = %config.client.base_url,
        timeout = ?config.client.timeout,
        "report service configured"
    );

    let runtime = tokio::runtime::Runtime::new().wrap_err("failed to start the async runtime")?;
    let client = ReportClient::new(config.client.clone())?;
    let dispatcher = Dispatcher::new(Arc::new(client), runtime.handle().clone());
    let app = InventoryApp::new(
        config.start_route,
        dispatcher,
        Box::new(NativeDialogs),
        Box::new(SaveToDisk::new(config.download_dir.clone())),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Inventory Automation",
        options,
        Box::new(move |_cc: &CreationContext| Box::new(app)),
    )
    .map_err(|e| eyre!("window closed with an error: {e}"))
}
