use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use shortener_core::{ResponseGate, WorkflowConfig, STATUS_DISPLAY};
use shortener_engine::{SettingsError, ShortenerSettings, DEFAULT_ENDPOINT};

use super::logging::LogDestination;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "./isgd_shortener.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub(crate) enum GateSetting {
    #[default]
    LatestWins,
    Ungated,
}

impl From<GateSetting> for ResponseGate {
    fn from(value: GateSetting) -> Self {
        match value {
            GateSetting::LatestWins => ResponseGate::LatestWins,
            GateSetting::Ungated => ResponseGate::Ungated,
        }
    }
}

/// Settings read from `isgd_shortener.ron`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    pub request_timeout_secs: Option<u64>,
    pub status_display_secs: u64,
    pub response_gate: GateSetting,
    pub copy_on_success: bool,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            status_display_secs: STATUS_DISPLAY.as_secs(),
            response_gate: GateSetting::default(),
            copy_on_success: true,
            log: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies the configured overrides on top of a surface preset.
    pub(crate) fn workflow(&self, preset: WorkflowConfig) -> WorkflowConfig {
        WorkflowConfig {
            gate: self.response_gate.into(),
            copy_on_success: self.copy_on_success,
            status_display: Duration::from_secs(self.status_display_secs),
            ..preset
        }
    }

    pub(crate) fn shortener_settings(&self) -> Result<ShortenerSettings, SettingsError> {
        let mut settings = ShortenerSettings::default().with_endpoint(&self.endpoint)?;
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        engine_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Loads `path`, or the default file when `path` is `None`.
///
/// Only the default file may be missing; an explicit path must exist.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
