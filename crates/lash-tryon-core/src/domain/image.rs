//! Source photos and overlay assets.

use anyhow::{Context, Result};
use image::RgbaImage;

use super::Size2;

/// A decoded source photo with its intrinsic ("natural") dimensions.
///
/// The intrinsic size is distinct from the displayed size; the fit
/// transform maps between the two.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// URI the photo was stored under (file path or provider URI).
    pub uri: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub pixels: RgbaImage,
}

impl SourceImage {
    /// Creates a source image from decoded pixels.
    #[must_use]
    pub fn new(uri: impl Into<String>, pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            uri: uri.into(),
            width,
            height,
            pixels,
        }
    }

    /// Decodes a source image from an encoded payload (JPEG, PNG, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a decodable image.
    pub fn from_bytes(uri: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let uri = uri.into();
        let decoded = image::load_from_memory(bytes)
            .with_context(|| format!("Failed to decode image payload for {uri}"))?;
        Ok(Self::new(uri, decoded.to_rgba8()))
    }

    /// Intrinsic size of the photo.
    #[must_use]
    pub const fn size(&self) -> Size2 {
        Size2::new(self.width, self.height)
    }
}

/// A cosmetic overlay asset (an eyelash graphic) from the static catalog.
///
/// At most one overlay is active at a time; the selection is user-driven
/// and persists across photo changes until changed again.
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    /// Catalog name of the asset.
    pub name: String,
    /// Decoded asset raster.
    pub pixels: RgbaImage,
}

impl OverlayAsset {
    /// Creates an overlay asset from decoded pixels.
    #[must_use]
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Intrinsic size of the asset raster.
    #[must_use]
    pub fn size(&self) -> Size2 {
        let (width, height) = self.pixels.dimensions();
        Size2::new(width, height)
    }
}
