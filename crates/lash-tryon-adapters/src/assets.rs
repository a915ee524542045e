//! Overlay asset catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use lash_tryon_core::domain::OverlayAsset;
use tracing::debug;

/// Intrinsic size of built-in overlay rasters.
const BUILTIN_SIZE: (u32, u32) = (240, 120);

/// Overlay catalog metadata.
#[derive(Debug, Clone)]
pub struct OverlayInfo {
    /// Overlay name/identifier.
    pub name: &'static str,
    /// Filename in the assets directory.
    pub filename: &'static str,
    /// Short description shown in listings.
    pub description: &'static str,
    /// Fringe stroke count for the built-in raster.
    pub strokes: u32,
}

/// Known overlays.
pub const OVERLAYS: &[OverlayInfo] = &[
    OverlayInfo {
        name: "natural",
        filename: "natural.png",
        description: "Light everyday fringe",
        strokes: 26,
    },
    OverlayInfo {
        name: "volume",
        filename: "volume.png",
        description: "Fuller fringe with extra density",
        strokes: 42,
    },
    OverlayInfo {
        name: "dramatic",
        filename: "dramatic.png",
        description: "Maximum density and sweep",
        strokes: 60,
    },
];

/// Returns the default overlay assets directory.
///
/// Uses `XDG_DATA_HOME/lash-tryon/overlays` or
/// `~/.local/share/lash-tryon/overlays`.
#[must_use]
pub fn assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lash-tryon")
        .join("overlays")
}

/// Returns the path a named overlay would be installed at.
#[must_use]
pub fn overlay_path(name: &str, dir: &Path) -> Option<PathBuf> {
    OVERLAYS
        .iter()
        .find(|o| o.name == name)
        .map(|o| dir.join(o.filename))
}

/// Lists catalog overlays with whether a custom raster is installed.
#[must_use]
pub fn list_overlays(dir: &Path) -> Vec<(String, bool)> {
    OVERLAYS
        .iter()
        .map(|o| (o.name.to_string(), dir.join(o.filename).exists()))
        .collect()
}

/// Loads a named overlay, preferring an installed raster over the
/// built-in one.
///
/// # Errors
///
/// Returns an error if the name is not in the catalog or an installed
/// raster exists but cannot be decoded.
pub fn load_overlay(name: &str, dir: &Path) -> Result<OverlayAsset> {
    let Some(info) = OVERLAYS.iter().find(|o| o.name == name) else {
        anyhow::bail!(
            "Unknown overlay '{name}'. Available: {}",
            OVERLAYS
                .iter()
                .map(|o| o.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let path = dir.join(info.filename);
    if path.exists() {
        debug!("loading installed overlay {}", path.display());
        let raster = image::open(&path)
            .with_context(|| format!("Failed to open overlay: {}", path.display()))?;
        return Ok(OverlayAsset::new(info.name, raster.to_rgba8()));
    }

    debug!("no installed raster for '{}', using built-in", info.name);
    Ok(OverlayAsset::new(info.name, builtin_raster(info)))
}

/// Draws the built-in raster for a catalog entry: a strip of lash strokes
/// rising from the bottom edge, longest and most swept at the outer (left)
/// corner, fading toward the tips.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn builtin_raster(info: &OverlayInfo) -> RgbaImage {
    let (width, height) = BUILTIN_SIZE;
    let mut raster = RgbaImage::new(width, height);
    let strokes = info.strokes.max(1);

    for i in 0..strokes {
        let base_x = (i as f32 + 0.5) * width as f32 / strokes as f32;
        // 0.0 at the outer corner, 1.0 at the inner end of the strip.
        let along = base_x / width as f32;
        let length = (height as f32 - 2.0) * (0.9 - 0.45 * along);
        let lean = -(1.0 - along) * 0.35;

        let steps = length.max(1.0) as u32;
        for t in 0..steps {
            let progress = t as f32 / length;
            let y = (height as f32 - 1.0) - t as f32;
            let x = base_x + lean * progress * progress * length;
            let alpha = (255.0 - 140.0 * progress) as u8;

            let xi = x.round() as i64;
            let yi = y.round() as i64;
            for dx in 0..2i64 {
                let px = xi + dx;
                if (0..i64::from(width)).contains(&px) && (0..i64::from(height)).contains(&yi) {
                    raster.put_pixel(px as u32, yi as u32, Rgba([26, 18, 16, alpha]));
                }
            }
        }
    }

    raster
}
