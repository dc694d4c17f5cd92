//! Progress reporting for backend requests

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a request is in flight
///
/// Cleared when dropped, so an early return or `?` never leaves it behind.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Start a spinner with `message`; a disabled reporter draws nothing
    pub fn start(message: impl Into<String>, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    #[cfg(test)]
    fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
