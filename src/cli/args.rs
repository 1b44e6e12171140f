//! CLI argument definitions using clap derive

use clap::Parser;

/// numake - run make.nu tasks with a pinned Nushell
///
/// Downloads the pinned Nushell release on first use, finds the nearest
/// make.nu and runs the given command with it loaded.
#[derive(Parser, Debug)]
#[command(name = "numake")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print numake and nushell versions
    #[arg(short = 'v', long, exclusive = true)]
    pub version: bool,

    /// List the commands defined in make.nu
    #[arg(short, long, exclusive = true)]
    pub list: bool,

    /// Start an interactive Nushell with make.nu loaded
    #[arg(short, long, exclusive = true)]
    pub interactive: bool,

    /// Install the pinned Nushell and print its path
    #[arg(long, exclusive = true)]
    pub install: bool,

    /// Command to run with make.nu loaded (arguments are passed verbatim)
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// What a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Version,
    List,
    Interactive,
    Install,
    Run(String),
}

impl Cli {
    /// Resolve flags and arguments to a single action
    pub fn action(&self) -> Action {
        if self.version {
            Action::Version
        } else if self.interactive {
            Action::Interactive
        } else if self.install {
            Action::Install
        } else if self.list || self.command.is_empty() {
            Action::List
        } else {
            Action::Run(self.command.join(" "))
        }
    }
}
