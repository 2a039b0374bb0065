//! Drawing abstraction shared by every effect and idle layer.
//!
//! A [`Surface`] is one region's rectangular drawing target. Implementations
//! exist for Canvas2D (web), an RGBA software raster ([`crate::PixelSurface`])
//! and a command recorder used in tests ([`crate::RecordingSurface`]).
//!
//! The only piece of ambient drawing state is the global alpha. Code that
//! changes it goes through [`with_alpha`], whose guard restores the previous
//! value on drop, so a surface is neutral again when a draw routine returns
//! even if it bails out early with `?`.

use crate::color::Rgba;
use glam::Vec2;
use std::ops::{Deref, DerefMut};

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing backend rejected {op}: {detail}")]
    Backend { op: &'static str, detail: String },
    #[error("non-finite geometry passed to {0}")]
    NonFinite(&'static str),
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Erase the whole surface to transparent.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Current global alpha multiplier in \[0, 1\].
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) -> Result<(), SurfaceError>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), SurfaceError>;
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) -> Result<(), SurfaceError>;
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) -> Result<(), SurfaceError>;
    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        width: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError>;
    /// Text centred on `center`, `size` is the glyph height in pixels.
    fn fill_text(
        &mut self,
        text: &str,
        center: Vec2,
        size: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError>;

    #[inline]
    fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    fn fill_all(&mut self, color: Rgba) -> Result<(), SurfaceError> {
        let size = self.size();
        self.fill_rect(Vec2::ZERO, size, color)
    }
}

/// Guard returned by [`with_alpha`]; derefs to the wrapped surface.
pub struct AlphaScope<'a> {
    surface: &'a mut dyn Surface,
    restore: f32,
}

/// Multiply the surface's global alpha by `alpha` until the guard drops.
pub fn with_alpha<'a>(surface: &'a mut dyn Surface, alpha: f32) -> AlphaScope<'a> {
    let restore = surface.alpha();
    surface.set_alpha((restore * alpha).clamp(0.0, 1.0));
    AlphaScope { surface, restore }
}

impl<'a> Deref for AlphaScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for AlphaScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for AlphaScope<'_> {
    fn drop(&mut self) {
        self.surface.set_alpha(self.restore);
    }
}

/// Reject NaN/inf before it reaches a backend.
#[inline]
pub fn ensure_finite(op: &'static str, values: &[f32]) -> Result<(), SurfaceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::NonFinite(op))
    }
}

#[inline]
pub fn ensure_finite_points(op: &'static str, points: &[Vec2]) -> Result<(), SurfaceError> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::NonFinite(op))
    }
}
