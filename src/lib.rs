pub mod analysis;
pub mod controller;
pub mod history;
pub mod models;
pub mod report;
pub mod store;
pub mod ui;

use anyhow::Result;
use log::info;
use tokio::sync::mpsc;

use analysis::AnalysisEngine;
use controller::AppController;
use store::Store;

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("contrascan starting up...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let store = Store::open(Store::default_dir())?;
    let controller = AppController::new(store);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = AnalysisEngine::new(runtime.handle().clone(), event_tx);

    ui::run(controller, engine, event_rx)
}
