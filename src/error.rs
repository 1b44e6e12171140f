//! Error types for numake
//!
//! All modules use `NumakeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for numake operations
pub type NumakeResult<T> = Result<T, NumakeError>;

/// All errors that can occur in numake
#[derive(Error, Debug)]
pub enum NumakeError {
    // Environment errors
    #[error("Unsupported platform: {0}. numake supports macOS and Linux.")]
    UnsupportedPlatform(String),

    #[error("Invalid package version {version}: {reason}")]
    InvalidPackageVersion { version: String, reason: String },

    // Provisioning errors
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to extract {archive}: {reason}")]
    Extraction { archive: PathBuf, reason: String },

    #[error("Nushell reported version {reported}, expected {expected}")]
    VersionMismatch { expected: String, reported: String },

    // Project errors
    #[error("Could not find make.nu in {start} or any parent directory")]
    MakefileNotFound { start: PathBuf },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    #[error("Command exited with code {code}: {command}")]
    CommandExit { command: String, code: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NumakeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Download { .. } => Some("Check your network connection and run numake again"),
            Self::Extraction { .. } => Some("Make sure `tar` is installed and on PATH"),
            Self::MakefileNotFound { .. } => Some("Create a make.nu file at the project root"),
            Self::VersionMismatch { .. } => {
                Some("Remove the numake data directory to force a fresh download")
            }
            _ => None,
        }
    }
}
