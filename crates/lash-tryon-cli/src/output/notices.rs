//! Notice sink printing to stderr.

use lash_tryon_core::{Notice, NoticeSink};

/// Prints session notices to stderr, the CLI stand-in for on-screen toasts.
pub struct StderrNotices {
    quiet: bool,
}

impl StderrNotices {
    /// Creates a new stderr notice sink.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl NoticeSink for StderrNotices {
    fn notify(&self, notice: Notice) {
        if self.quiet {
            return;
        }
        eprintln!("notice: {}", notice.user_message());
    }
}
