mod app;
mod cli;
mod config;
mod console;
mod domain;
mod infrastructure;
mod report;
mod scoring;
mod signals;
mod widget;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging, shutdown};

use crate::cli::{Cli, CliCommand};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let app = app::GeoScoreApp::initialize(config, paths)?;

    match cli.command {
        Some(CliCommand::Score { url, export, json }) => app.run_once(&url, export, json).await,
        Some(CliCommand::Interactive) | None => {
            let shutdown = shutdown::Shutdown::new();
            shutdown::install_signal_handlers(shutdown.clone());
            app.run_interactive(shutdown).await
        }
    }
}
