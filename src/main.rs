mod app;
mod classifier;
mod config;
mod domain;
mod infrastructure;
mod tasks;
mod view;
mod web;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging, &paths.logs_dir)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::LeadPageApp::initialize(config, paths, shutdown).await?;
    app.run().await
}
