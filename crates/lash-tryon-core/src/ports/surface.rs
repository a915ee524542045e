//! Display surface port: the paintable region the compositor renders into.

use image::{Rgba, RgbaImage};

use crate::domain::{Point2, Size2};

/// A 2D paintable region with its own pixel size.
///
/// The surface's size is independent of any source image's intrinsic size;
/// the compositor computes the mapping between the two before drawing. The
/// surface is the only mutable resource the renderer touches, and every
/// primitive is deterministic so that repeating the same sequence of calls
/// reproduces the same pixels.
pub trait DisplaySurface {
    /// Current pixel size of the surface.
    fn size(&self) -> Size2;

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Draws `pixels` scaled into the axis-aligned rectangle at
    /// `(x, y)` with the given extent, in surface space.
    fn draw_image(&mut self, pixels: &RgbaImage, x: f32, y: f32, width: f32, height: f32);

    /// Fills a circle centered at `center`, in surface space.
    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba<u8>);
}
