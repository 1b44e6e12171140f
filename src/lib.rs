//! numake - make.nu task runner
//!
//! Provisions a pinned Nushell release into a local cache, finds the
//! nearest make.nu and runs commands against it.

pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod meta;
pub mod nushell;
pub mod platform;
pub mod project;
pub mod provision;
pub mod ui;

pub use error::{NumakeError, NumakeResult};
pub use log::{LogLevel, Logger};
