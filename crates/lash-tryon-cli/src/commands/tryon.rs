//! Tryon command - compose an overlay onto a photo.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use lash_tryon_adapters::{
    DEFAULT_RETAIN_LAST, DataDirStorage, FileCapture, PixmapSurface, SIDECAR_SUFFIX,
    SidecarLandmarks, assets_dir, load_overlay,
};
use lash_tryon_core::{
    CaptureOutcome, DEFAULT_CAPTURE_QUALITY, MarkerStyle, OverlayPlacement, OverlayTuning,
    PhotoSource, RenderOptions, SessionConfig, SessionController, SessionPhase, Size2,
};
use serde::Serialize;
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, StageSpinner, StderrNotices};

/// Hardcoded default values for the composition.
mod defaults {
    /// Output surface size, a portrait phone viewport.
    pub const SURFACE: (u32, u32) = (1080, 1920);
}

/// Parse and validate a surface size written as WIDTHxHEIGHT.
fn parse_surface_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("'{s}' is not in WIDTHxHEIGHT form"))?;
    let width: u32 = w
        .trim()
        .parse()
        .map_err(|_| format!("'{w}' is not a valid number"))?;
    let height: u32 = h
        .trim()
        .parse()
        .map_err(|_| format!("'{h}' is not a valid number"))?;
    if width == 0 || height == 0 {
        return Err(format!("{width}x{height} has a zero dimension"));
    }
    Ok((width, height))
}

/// Parse and validate a capture quality (0-100).
fn parse_quality(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value <= 100 {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Shared arguments for the try-on composition.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct TryonArgs {
    /// Photo to compose (any format the image crate can decode)
    #[arg(value_name = "PHOTO")]
    pub input: Option<PathBuf>,

    /// Landmark sidecar file (defaults to <PHOTO>.landmarks.json)
    #[arg(long, value_name = "FILE")]
    pub landmarks: Option<PathBuf>,

    /// Overlay to compose (natural, volume, dramatic)
    #[arg(long, value_name = "NAME")]
    pub overlay: Option<String>,

    /// Output surface size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_surface_size, value_name = "WxH")]
    pub surface: Option<(u32, u32)>,

    /// Capture quality hint (0-100)
    #[arg(long, value_parser = parse_quality)]
    pub quality: Option<u8>,

    /// Draw a marker on every landmark point
    #[arg(long)]
    pub draw_landmarks: bool,

    /// Write the composed frame to this PNG file
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print a JSON summary of the composition to stdout
    #[arg(long)]
    pub json: bool,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pub pretty: bool,

    /// Suppress notices and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for stored captures (defaults to the user data dir)
    #[arg(long, value_name = "DIR")]
    pub captures_dir: Option<PathBuf>,

    /// Stored captures to retain, 0 to keep all
    #[arg(long, value_name = "N")]
    pub retain: Option<usize>,

    /// Custom overlay assets directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl TryonArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// For boolean flags: the CLI flag always wins; config can enable them
    /// only when the flag wasn't passed.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Scalars: CLI > config (accessor provides hardcoded fallback)
        args.quality = args.quality.or(config.capture.quality);
        args.retain = args.retain.or(config.storage.retain_last);
        if args.overlay.is_none() {
            args.overlay.clone_from(&config.overlay.name);
        }

        // Surface: CLI > config (malformed config values were already
        // warned about by validation and fall through to the default)
        if args.surface.is_none() {
            args.surface = config
                .render
                .surface
                .as_deref()
                .and_then(|s| parse_surface_size(s).ok());
        }

        // Boolean flags: CLI flag wins, then config
        if !args.draw_landmarks {
            args.draw_landmarks = config.render.draw_landmarks.unwrap_or(false);
        }
        if !args.json {
            args.json = config.output.json.unwrap_or(false);
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }

        // Directories: CLI > config
        if args.captures_dir.is_none() {
            args.captures_dir.clone_from(&config.storage.captures_dir);
        }
        if args.assets_dir.is_none() {
            args.assets_dir.clone_from(&config.assets.dir);
        }

        // Store config for tuning and marker access
        args.config = Some(config.clone());

        args
    }

    /// Get surface size with fallback to hardcoded default.
    fn surface(&self) -> (u32, u32) {
        self.surface.unwrap_or(defaults::SURFACE)
    }

    /// Get capture quality with fallback to the port default.
    fn quality(&self) -> u8 {
        self.quality.unwrap_or(DEFAULT_CAPTURE_QUALITY)
    }

    /// Get capture retention with fallback to the storage default.
    fn retain(&self) -> usize {
        self.retain.unwrap_or(DEFAULT_RETAIN_LAST)
    }

    /// Get the overlay assets directory with fallback to the user data dir.
    fn assets_dir(&self) -> PathBuf {
        self.assets_dir.clone().unwrap_or_else(assets_dir)
    }

    /// Overlay placement tuning from config, falling back per field.
    fn tuning(&self) -> OverlayTuning {
        let fallback = OverlayTuning::default();
        let overlay = self.config.as_ref().map(|c| &c.overlay);
        OverlayTuning {
            lead_fraction: overlay
                .and_then(|o| o.lead_fraction)
                .unwrap_or(fallback.lead_fraction),
            vertical_anchor: overlay
                .and_then(|o| o.vertical_anchor)
                .unwrap_or(fallback.vertical_anchor),
            aspect_ratio: overlay
                .and_then(|o| o.aspect_ratio)
                .unwrap_or(fallback.aspect_ratio),
        }
    }

    /// Render options from the merged flags and config.
    fn render_options(&self) -> RenderOptions {
        let mut marker = MarkerStyle::default();
        if let Some(radius) = self.config.as_ref().and_then(|c| c.render.marker_radius) {
            marker.radius = radius;
        }
        RenderOptions {
            draw_landmarks: self.draw_landmarks,
            marker,
        }
    }
}

/// Result of running the tryon command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct TryonResult {
    /// What the capture flow ended with.
    pub outcome: CaptureOutcome,
    /// Session phase after the flow.
    pub phase: SessionPhase,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// JSON summary of one composition, printed with `--json`.
#[derive(Serialize)]
struct TryonSummary {
    /// Input photo path as given.
    input: String,
    /// RFC 3339 timestamp of the run.
    timestamp: String,
    /// Capture outcome token.
    outcome: &'static str,
    /// Session phase after the flow.
    phase: &'static str,
    /// Surface the frame was composed for.
    surface: Size2,
    /// Selected overlay name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay: Option<String>,
    /// Overlay rectangle in surface space, when one was anchored.
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<OverlayPlacement>,
    /// Path the composed PNG was written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

/// Run the tryon command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &TryonArgs) -> Result<TryonResult> {
    let Some(ref input) = args.input else {
        anyhow::bail!("No input photo specified");
    };
    info!("Running try-on for {}", input.display());

    let sidecar = args
        .landmarks
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}{SIDECAR_SUFFIX}", input.display())));
    debug!("landmark sidecar: {}", sidecar.display());

    // Wire the providers
    let capture = Arc::new(FileCapture::new(input.clone()));
    let storage = Arc::new(match args.captures_dir {
        Some(ref dir) => DataDirStorage::new(dir.clone(), args.retain()),
        None => DataDirStorage::in_data_dir(args.retain()),
    });
    let detector = Arc::new(SidecarLandmarks::with_override(sidecar));
    let notices = Arc::new(StderrNotices::new(args.quiet));

    let session_config = SessionConfig {
        quality: args.quality(),
        tuning: args.tuning(),
    };
    let mut controller =
        SessionController::new(capture, storage, detector, notices, session_config);

    let show_progress = !args.quiet && std::io::stderr().is_terminal();
    let spinner = StageSpinner::new(show_progress);

    spinner.stage("loading photo");
    let outcome = controller.capture(PhotoSource::Library);
    debug!("capture outcome: {outcome:?}");

    if matches!(outcome, CaptureOutcome::Cancelled | CaptureOutcome::Failed) {
        spinner.clear();
        let exit_code = if outcome == CaptureOutcome::Failed {
            ExitCode::Error
        } else {
            ExitCode::Success
        };
        return Ok(TryonResult {
            outcome,
            phase: controller.phase(),
            exit_code,
        });
    }

    // The selection sticks to the session even when no face was found; the
    // frame then shows the photo alone, like the phone screen would.
    if let Some(ref name) = args.overlay {
        spinner.stage("loading overlay");
        let overlay = load_overlay(name, &args.assets_dir())?;
        controller.select_overlay(overlay);
    }

    spinner.stage("rendering");
    let (width, height) = args.surface();
    let mut surface = PixmapSurface::new(width, height)?;
    controller
        .render_to(&mut surface, &args.render_options())
        .context("Failed to compose the frame")?;

    if let Some(ref out) = args.out {
        surface.save_png(out)?;
        info!("wrote {}", out.display());
    }

    spinner.clear();

    if args.json {
        let placement = controller
            .overlay_placement(Size2::new(width, height))
            .context("Failed to place the overlay")?;
        let summary = TryonSummary {
            input: input.display().to_string(),
            timestamp: iso_timestamp(),
            outcome: outcome_name(outcome),
            phase: phase_name(controller.phase()),
            surface: Size2::new(width, height),
            overlay: args.overlay.clone(),
            placement,
            output: args.out.as_ref().map(|p| p.display().to_string()),
        };
        let output = JsonOutput::stdout();
        output.write(&summary, args.pretty)?;
        output.flush()?;
    }

    let exit_code = match outcome {
        CaptureOutcome::Loaded | CaptureOutcome::Cancelled => ExitCode::Success,
        CaptureOutcome::NoFace => ExitCode::NoFace,
        CaptureOutcome::Failed => ExitCode::Error,
    };

    Ok(TryonResult {
        outcome,
        phase: controller.phase(),
        exit_code,
    })
}

/// Stable lowercase token for the JSON summary.
const fn outcome_name(outcome: CaptureOutcome) -> &'static str {
    match outcome {
        CaptureOutcome::Loaded => "loaded",
        CaptureOutcome::Cancelled => "cancelled",
        CaptureOutcome::NoFace => "no-face",
        CaptureOutcome::Failed => "failed",
    }
}

/// Stable lowercase token for the JSON summary.
const fn phase_name(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Empty => "empty",
        SessionPhase::ImageLoaded => "image-loaded",
        SessionPhase::LandmarksReady => "landmarks-ready",
        SessionPhase::OverlaySelected => "overlay-selected",
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
