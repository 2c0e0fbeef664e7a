//! Full-viewport drawing surface for the overlay

use glint_core::{BlendMode, PointerEvents, Size};
use glint_platform::Viewport;

/// The canvas the overlay paints into
///
/// Covers the whole viewport, never receives input and composites onto the
/// page with screen blending. The backing store is sized in device pixels,
/// with the pixel ratio capped to bound memory on very dense displays.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSurface {
    logical_size: Size,
    pixel_width: u32,
    pixel_height: u32,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl CanvasSurface {
    /// An unsized surface; call [`CanvasSurface::resize`] before painting
    pub fn new(max_pixel_ratio: f32) -> Self {
        Self {
            logical_size: Size::ZERO,
            pixel_width: 0,
            pixel_height: 0,
            pixel_ratio: 1.0,
            max_pixel_ratio,
        }
    }

    /// Match the viewport
    ///
    /// Returns true if the logical or backing size changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let ratio = (viewport.scale_factor as f32).min(self.max_pixel_ratio);
        let logical = Size::new(viewport.width, viewport.height);
        let pixel_width = (logical.width * ratio).round() as u32;
        let pixel_height = (logical.height * ratio).round() as u32;

        let changed = logical != self.logical_size
            || pixel_width != self.pixel_width
            || pixel_height != self.pixel_height;

        self.logical_size = logical;
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self.pixel_ratio = ratio;

        if changed {
            tracing::debug!(
                "CanvasSurface: {}x{} logical, {}x{} backing (ratio {})",
                logical.width,
                logical.height,
                pixel_width,
                pixel_height,
                ratio
            );
        }
        changed
    }

    pub fn logical_size(&self) -> Size {
        self.logical_size
    }

    /// Backing store size in device pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn pointer_events(&self) -> PointerEvents {
        PointerEvents::None
    }

    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::Screen
    }
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(2.0)
    }
}
