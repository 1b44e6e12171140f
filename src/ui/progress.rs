//! Download spinner with quiet fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a release archive downloads
pub struct DownloadSpinner {
    bar: Option<ProgressBar>,
}

impl DownloadSpinner {
    /// Start the spinner (no-op unless fancy output is enabled)
    pub fn start(ctx: &UiContext, label: &str) -> Self {
        if !ctx.use_fancy_output() {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} Downloading {prefix}  {elapsed:.dim}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar: Some(bar) }
    }

    /// Stop and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

impl Drop for DownloadSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let spinner = DownloadSpinner::start(&ctx, "nu-0.94.2.tar.gz");
        assert!(spinner.bar.is_none());
        spinner.finish();
    }
}
