//! Assets command - inspect the overlay catalog.
//!
//! Every catalog overlay works out of the box through its built-in raster;
//! an installed PNG in the assets directory replaces it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use lash_tryon_adapters::{OVERLAYS, assets_dir, list_overlays};

/// Arguments for the assets command
#[derive(Args)]
pub struct AssetsArgs {
    /// Custom overlay assets directory
    #[arg(long, value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AssetsCommand,
}

/// Assets subcommands
#[derive(Subcommand)]
pub enum AssetsCommand {
    /// List catalog overlays and their installed rasters
    List,
    /// Print the assets directory path
    Path,
}

/// Run the assets command.
pub fn run(args: &AssetsArgs) -> Result<()> {
    match args.command {
        AssetsCommand::List => list(args),
        AssetsCommand::Path => print_path(args),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn list(args: &AssetsArgs) -> Result<()> {
    let dir = args.dir.clone().unwrap_or_else(assets_dir);
    let overlays = list_overlays(&dir);

    println!("Overlays directory: {}", dir.display());
    println!();

    for (name, installed) in &overlays {
        let status = if *installed { "✓" } else { "✗" };
        let info = OVERLAYS.iter().find(|o| o.name == name);
        let filename = info.map_or("unknown", |o| o.filename);
        let description = info.map_or("", |o| o.description);
        println!("  {status} {name} ({filename}) - {description}");
    }

    println!();
    let installed_count = overlays.iter().filter(|(_, installed)| *installed).count();
    println!("{}/{} overlays installed", installed_count, overlays.len());

    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_path(args: &AssetsArgs) -> Result<()> {
    let path = args.dir.clone().unwrap_or_else(assets_dir);
    println!("{}", path.display());
    Ok(())
}
