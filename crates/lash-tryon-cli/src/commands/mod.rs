//! CLI command definitions and handlers.

pub mod assets;
pub mod tryon;

use clap::{Parser, Subcommand};

/// Lash try-on - eyelash overlay compositor
#[derive(Parser)]
#[command(name = "lash-tryon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared try-on arguments (input, overlay, surface).
    #[command(flatten)]
    pub tryon: tryon::TryonArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Compose an overlay onto a photo
    Tryon(tryon::TryonArgs),
    /// Manage overlay assets
    Assets(assets::AssetsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// The composition completed.
    Success = 0,
    /// The photo loaded but no face was found in it.
    NoFace = 1,
    /// A provider or I/O failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
