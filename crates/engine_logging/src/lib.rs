#![deny(missing_docs)]
//! Shared logging utilities for the shortener workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro logs
//! under [`LOG_TARGET`] so the app can filter workspace output from the
//! chatter of the HTTP stack.

/// Target attached to every record emitted through the `engine_*` macros.
pub const LOG_TARGET: &str = "isgd";

/// Environment variable read by [`initialize_for_tests`] to override the level.
pub const TEST_LOG_ENV: &str = "ISGD_TEST_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Parses a level name (`"off"`, `"error"`, ... `"trace"`), case-insensitively.
pub fn parse_level(raw: &str) -> Option<log::LevelFilter> {
    raw.trim().parse::<log::LevelFilter>().ok()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// The level defaults to debug in debug builds and info otherwise, and can be
/// overridden through `ISGD_TEST_LOG`. This safely no-ops if another logger
/// has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let default_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let level = std::env::var(TEST_LOG_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(default_level);

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
