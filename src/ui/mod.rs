//! Terminal output helpers
//!
//! numake is quiet by default: the spinner only appears for verbose runs in
//! an interactive terminal, and everything else is plain `println!` output.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{command_list, error, versions};
pub use progress::DownloadSpinner;
