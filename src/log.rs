//! Leveled logging through an explicit logger value
//!
//! The logger is built once by the entry point and passed by reference to
//! every component. Events go through `tracing`, scoped to the logger's own
//! dispatcher, so nothing is installed as a process-wide default.

use std::fmt;
use std::str::FromStr;
use tracing::Dispatch;

/// Message severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// Leveled log sink
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    dispatch: Dispatch,
}

impl Logger {
    /// Create a logger writing to stderr at the given level
    pub fn new(level: LogLevel) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .finish();

        Self {
            level,
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Create a logger that drops everything (for tests and library callers)
    pub fn silent() -> Self {
        Self {
            level: LogLevel::Error,
            dispatch: Dispatch::none(),
        }
    }

    /// Whether messages of `level` are emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level <= level
    }

    /// Emit a message at `level`
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }

        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        });
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }
}
