//! Host trait and viewport description

use crate::error::{PlatformError, Result};

/// Identifier of a pending animation-frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Identifier of a registered host listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Current viewport geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: f32,
    /// Height in logical pixels
    pub height: f32,
    /// Device pixel ratio
    pub scale_factor: f64,
}

impl Viewport {
    /// Create a viewport at scale factor 1.0
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale_factor: 1.0,
        }
    }

    /// Set the scale factor
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Create a viewport, rejecting negative or non-finite values
    pub fn try_new(width: f32, height: f32, scale_factor: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(PlatformError::InvalidViewport(format!(
                "{}x{} is not a valid size",
                width, height
            )));
        }
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(PlatformError::InvalidViewport(format!(
                "scale factor {} must be positive",
                scale_factor
            )));
        }
        Ok(Self {
            width,
            height,
            scale_factor,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The page host an effect is mounted into
///
/// Mirrors what a browser offers a component: animation-frame scheduling
/// synchronized with paint, viewport resize notifications, and the current
/// viewport. All calls happen on the host's single UI thread, so methods
/// take `&self` and implementations use interior mutability.
pub trait Host {
    /// Ask for [`crate::Event::Frame`] to be delivered before the next paint
    fn request_animation_frame(&self) -> FrameRequestId;

    /// Cancel a pending frame request
    ///
    /// Cancelling an unknown or already-delivered request is a no-op.
    fn cancel_animation_frame(&self, id: FrameRequestId);

    /// Start delivering viewport resize events to the caller
    fn add_resize_listener(&self) -> ListenerId;

    /// Stop delivering events for a listener
    ///
    /// Removing an unknown listener is a no-op.
    fn remove_listener(&self, id: ListenerId);

    /// Current viewport geometry
    fn viewport(&self) -> Viewport;
}
