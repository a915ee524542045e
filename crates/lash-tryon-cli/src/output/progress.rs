//! Stage spinner adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Spinner showing the current pipeline stage on stderr.
pub struct StageSpinner {
    bar: Option<IndicatifBar>,
}

impl StageSpinner {
    /// Creates a new stage spinner.
    ///
    /// When `show` is false the spinner stays hidden, keeping stderr
    /// clean for piped or quiet runs.
    #[must_use]
    pub fn new(show: bool) -> Self {
        if !show {
            return Self { bar: None };
        }

        let bar = IndicatifBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }

        Self { bar: Some(bar) }
    }

    /// Announces the stage the pipeline just entered.
    pub fn stage(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
            bar.tick();
        }
    }

    /// Removes the spinner from the terminal.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
