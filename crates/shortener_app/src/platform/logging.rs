//! Logger setup for both surfaces.
//!
//! Only records under the `isgd` target are kept, so reqwest and hyper stay
//! silent below `Error`. The toolbar surface is always routed to the file via
//! [`LogDestination::without_terminal`] because its stdout is the popover text.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./isgd_shortener.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Write to ./isgd_shortener.log in current directory.
    #[default]
    File,
    /// Write to terminal (stderr for errors, stdout otherwise).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    /// Same destination with the terminal part removed.
    pub fn without_terminal(self) -> Self {
        match self {
            LogDestination::Terminal | LogDestination::Both => LogDestination::File,
            other => other,
        }
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and the app runs without it.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => {
            if let Some(file_logger) = create_file_logger(level, config) {
                vec![file_logger]
            } else {
                return;
            }
        }
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Only records from the workspace macros pass; the HTTP stack stays quiet.
fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str(engine_logging::LOG_TARGET)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
