use std::time::Duration;

/// How long a status message stays visible before it is cleared.
pub const STATUS_DISPLAY: Duration = Duration::from_secs(3);

/// Reply encoding requested from the shortening service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `format=simple`: the body is the short URL or an `Error...` line.
    Plain,
    /// `format=json`: the body is a JSON object.
    #[default]
    Json,
}

/// Decides which completions may update the displayed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseGate {
    /// Only the completion of the most recently issued request is applied.
    #[default]
    LatestWins,
    /// Completions are applied in arrival order, so a slow earlier request
    /// overwrites the result of a later one.
    Ungated,
}

/// Per-surface workflow settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub format: ResponseFormat,
    pub gate: ResponseGate,
    /// Copy the short URL to the clipboard as soon as it arrives.
    pub copy_on_success: bool,
    pub status_display: Duration,
}

impl WorkflowConfig {
    /// Settings used by the standalone window.
    pub fn main_window() -> Self {
        Self {
            format: ResponseFormat::Json,
            gate: ResponseGate::default(),
            copy_on_success: true,
            status_display: STATUS_DISPLAY,
        }
    }

    /// Settings used by the browser toolbar handler.
    pub fn toolbar() -> Self {
        Self {
            format: ResponseFormat::Plain,
            ..Self::main_window()
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::main_window()
    }
}
