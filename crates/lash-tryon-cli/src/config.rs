//! Configuration file support for lash-tryon.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/lash-tryon/config.toml` (lowest priority)
//! - Project-local: `.lash-tryon.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Capture settings.
    pub capture: CaptureConfig,
    /// Overlay selection and placement tuning.
    pub overlay: OverlayConfig,
    /// Render settings.
    pub render: RenderConfig,
    /// Stored capture settings.
    pub storage: StorageConfig,
    /// Overlay asset settings.
    pub assets: AssetsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Capture configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Capture quality hint (0-100).
    pub quality: Option<u8>,
}

/// Overlay configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlay selected by default.
    pub name: Option<String>,
    /// Fraction of the overlay width leading past the outer eye corner.
    pub lead_fraction: Option<f32>,
    /// Fraction of the overlay height used to center it vertically.
    pub vertical_anchor: Option<f32>,
    /// Overlay height as a fraction of its width.
    pub aspect_ratio: Option<f32>,
}

/// Render configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Surface size as WIDTHxHEIGHT.
    pub surface: Option<String>,
    /// Draw landmark markers by default.
    pub draw_landmarks: Option<bool>,
    /// Landmark marker radius in surface pixels.
    pub marker_radius: Option<f32>,
}

/// Stored capture configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for stored captures.
    pub captures_dir: Option<PathBuf>,
    /// Stored captures to retain, 0 to keep all.
    pub retain_last: Option<usize>,
}

/// Overlay asset configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Custom overlay assets directory path.
    pub dir: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print a JSON summary by default.
    pub json: Option<bool>,
    /// Pretty-print the JSON summary.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/lash-tryon/config.toml`
    /// 2. Project-local: `.lash-tryon.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(q) = self.capture.quality {
            if q > 100 {
                return Err(format!("capture.quality must be 0-100, got {q}"));
            }
        }

        // Tuning fraction validations (0.0-1.0 range)
        if let Some(f) = self.overlay.lead_fraction {
            if !(0.0..=1.0).contains(&f) {
                return Err(format!("overlay.lead_fraction must be 0.0-1.0, got {f}"));
            }
        }
        if let Some(f) = self.overlay.vertical_anchor {
            if !(0.0..=1.0).contains(&f) {
                return Err(format!("overlay.vertical_anchor must be 0.0-1.0, got {f}"));
            }
        }
        if let Some(f) = self.overlay.aspect_ratio {
            if !(0.0..=1.0).contains(&f) {
                return Err(format!("overlay.aspect_ratio must be 0.0-1.0, got {f}"));
            }
        }

        if let Some(r) = self.render.marker_radius {
            if r <= 0.0 {
                return Err(format!("render.marker_radius must be positive, got {r}"));
            }
        }

        // Surface size validation
        if let Some(ref s) = self.render.surface {
            let valid = s
                .split_once(['x', 'X'])
                .map(|(w, h)| {
                    w.trim().parse::<u32>().is_ok_and(|v| v > 0)
                        && h.trim().parse::<u32>().is_ok_and(|v| v > 0)
                })
                .unwrap_or(false);
            if !valid {
                return Err(format!("render.surface must be WIDTHxHEIGHT, got '{s}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Capture
        self.capture.quality = other.capture.quality.or(self.capture.quality);

        // Overlay
        self.overlay.name = other.overlay.name.or_else(|| self.overlay.name.take());
        self.overlay.lead_fraction = other.overlay.lead_fraction.or(self.overlay.lead_fraction);
        self.overlay.vertical_anchor = other
            .overlay
            .vertical_anchor
            .or(self.overlay.vertical_anchor);
        self.overlay.aspect_ratio = other.overlay.aspect_ratio.or(self.overlay.aspect_ratio);

        // Render
        self.render.surface = other.render.surface.or_else(|| self.render.surface.take());
        self.render.draw_landmarks = other.render.draw_landmarks.or(self.render.draw_landmarks);
        self.render.marker_radius = other.render.marker_radius.or(self.render.marker_radius);

        // Storage
        self.storage.captures_dir = other
            .storage
            .captures_dir
            .or_else(|| self.storage.captures_dir.take());
        self.storage.retain_last = other.storage.retain_last.or(self.storage.retain_last);

        // Assets
        self.assets.dir = other.assets.dir.or_else(|| self.assets.dir.take());

        // Output
        self.output.json = other.output.json.or(self.output.json);
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lash-tryon").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.lash-tryon.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".lash-tryon.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
