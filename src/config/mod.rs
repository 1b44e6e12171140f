//! Runtime settings for numake
//!
//! Settings are read from the environment once at startup and are
//! read-only afterwards.

use crate::log::{LogLevel, Logger};
use std::path::PathBuf;

/// Enables debug logging, version verification and error details
pub const DEBUG_ENV: &str = "NUMAKE_DEBUG";
/// Log level override (`debug`, `info`, `warn`, `error`)
pub const LOG_ENV: &str = "NUMAKE_LOG";
/// Data directory override
pub const DATA_DIR_ENV: &str = "NUMAKE_DATA_DIR";

const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";
const APP_DIR_NAME: &str = "numake";
const CACHE_DIR_NAME: &str = ".cache";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;

/// Process-wide settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Debug mode
    pub debug: bool,
    /// Effective log level
    pub log_level: LogLevel,
    /// Root of the download cache and installed versions
    pub data_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let debug = non_empty(DEBUG_ENV).is_some_and(|v| is_truthy(&v));

        let log_level = if debug {
            LogLevel::Debug
        } else {
            non_empty(LOG_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL)
        };

        let data_dir = non_empty(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| non_empty(XDG_DATA_HOME_ENV).map(|d| PathBuf::from(d).join(APP_DIR_NAME)))
            .unwrap_or_else(Self::default_data_dir);

        Self {
            debug,
            log_level,
            data_dir,
        }
    }

    /// Data directory used when no override is set: `.cache` next to the
    /// numake executable
    pub fn default_data_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CACHE_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(".").join(CACHE_DIR_NAME))
    }

    /// Build the logger for these settings
    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
