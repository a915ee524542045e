//! The image compositor: fit transform, overlay placement, rendering.
//!
//! Everything in this module except [`render`] is a pure function of its
//! inputs, safe to call from anywhere without synchronization. [`render`]
//! confines its side effects to the surface it is handed.

mod placement;
mod render;
mod transform;

pub use placement::{
    OverlayPlacement, OverlayTuning, PlacementError, compute_overlay_placement, reference_points,
};
pub use render::{MarkerStyle, RenderOptions, render};
pub use transform::{FitTransform, compute_fit_transform};
