//! Spinner shown while a chat request is outstanding

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for a single pending request. Hidden when disabled.
pub struct LoadingSpinner {
    bar: ProgressBar,
}

impl LoadingSpinner {
    /// Start spinning with `message`; `enabled = false` draws nothing
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner from the terminal
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
