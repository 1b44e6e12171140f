//! UI context for detecting interactive vs CI environments

use crate::log::{LogLevel, Logger};
use std::io::IsTerminal;

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stderr is an interactive terminal outside CI
    interactive: bool,
    /// Whether informational output is wanted
    verbose: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect(logger: &Logger) -> Self {
        Self {
            interactive: Self::detect_interactive(),
            verbose: logger.enabled(LogLevel::Info),
        }
    }

    /// Create a non-interactive context (for testing or explicit CI mode)
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            verbose: false,
        }
    }

    /// Spinners are only drawn for verbose runs in a terminal
    pub fn use_fancy_output(&self) -> bool {
        self.interactive && self.verbose
    }

    fn detect_interactive() -> bool {
        if !std::io::stderr().is_terminal() {
            return false;
        }

        let ci_vars = [
            "CI",
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "TRAVIS",
            "JENKINS_URL",
            "BUILDKITE",
            "TEAMCITY_VERSION",
            "TF_BUILD",
        ];

        !ci_vars.iter().any(|var| std::env::var_os(var).is_some())
    }
}
