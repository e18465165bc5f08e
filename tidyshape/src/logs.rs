//! Logging for the reshaping pipeline.
//!
//! Progress messages go through `tracing` and are written to stderr, leaving
//! stdout for the reshaped rows and the fixed mismatch diagnostic.
//!
//! The `log_*` helpers tag each event with a [`LogLevel`] so the pipeline
//! reads as a sequence of info / success / warning / error steps.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Progress level of a pipeline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// Emit a pipeline message at the `tracing` level matching `level`.
pub fn log(level: LogLevel, message: &str) {
    let kind = level.as_str();
    match level {
        LogLevel::Info | LogLevel::Success => tracing::info!(kind, "{message}"),
        LogLevel::Warning => tracing::warn!(kind, "{message}"),
        LogLevel::Error => tracing::error!(kind, "{message}"),
    }
}

pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg.as_ref());
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg.as_ref());
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg.as_ref());
}

pub fn log_error(msg: impl AsRef<str>) {
    log(LogLevel::Error, msg.as_ref());
}

// =============================================================================
// Subscriber setup
// =============================================================================

/// Logging configuration derived from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Map a `-v` count to a level.
    ///
    /// - 0: warn (only problems)
    /// - 1 (`-v`): info, one line per stage
    /// - 2 (`-vv`): debug, row counts and paths
    /// - 3+ (`-vvv`): trace, per-row detail
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Only errors, regardless of verbosity.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: Level::ERROR,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Call once, at startup.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LogConfig) {
    fmt::Subscriber::builder()
        .with_env_filter(build_env_filter(config.level))
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time()
        .init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        // Dependencies stay at warn.
        EnvFilter::new(format!("warn,tidyshape={level}"))
    })
}
