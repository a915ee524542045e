//! Lash Tryon Adapters - Platform adapters for lash-tryon.
//!
//! This crate provides adapters for:
//! - File-backed photo capture
//! - Data-directory photo storage with bounded retention
//! - Sidecar-file landmark detection
//! - The overlay asset catalog
//! - A tiny-skia raster display surface

pub mod assets;
pub mod capture;
pub mod fs;
pub mod landmarks;
pub mod pixmap;

pub use assets::{OVERLAYS, OverlayInfo, assets_dir, list_overlays, load_overlay, overlay_path};
pub use capture::FileCapture;
pub use fs::{DEFAULT_RETAIN_LAST, DataDirStorage};
pub use landmarks::{SIDECAR_SUFFIX, SidecarLandmarks};
pub use pixmap::PixmapSurface;
