mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod toolbar;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use engine_logging::engine_info;

use cli::{Cli, SurfaceCommand};

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let surface = cli.surface.unwrap_or(SurfaceCommand::Window);
    // Toolbar output is the popover text, so terminal logging would corrupt it.
    let destination = match surface {
        SurfaceCommand::Toolbar { .. } => config.log.without_terminal(),
        SurfaceCommand::Window => config.log,
    };
    logging::initialize(destination, config.log_level());
    engine_info!(
        "Starting {:?} surface against {}",
        surface,
        config.endpoint
    );

    match surface {
        SurfaceCommand::Window => app::run_window(&config),
        SurfaceCommand::Toolbar { page_url, then } => {
            toolbar::run_toolbar(&config, &page_url, &then)
        }
    }
}
