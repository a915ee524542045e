//! Output formatting for CLI.

mod json;
mod notices;
mod progress;

pub use json::JsonOutput;
pub use notices::StderrNotices;
pub use progress::StageSpinner;
