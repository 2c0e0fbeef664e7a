//! Draw Context - the painting API used by every effect
//!
//! The `DrawContext` trait is the only thing an effect sees of its drawing
//! surface. Hosts implement it over a real canvas; [`RecordingContext`]
//! implements it by recording [`DrawCommand`]s so that effects can run
//! headless and be asserted on in tests.
//!
//! # Example
//!
//! ```
//! use glint_core::{BlendMode, Color, DrawContext, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.clear();
//! ctx.push_blend_mode(BlendMode::Screen);
//! ctx.fill_circle(Point::new(10.0, 10.0), 4.0, Color::WHITE.into());
//! ctx.pop_blend_mode();
//!
//! assert_eq!(ctx.commands().len(), 4);
//! ```

use smallvec::{smallvec, SmallVec};

use crate::layer::{BlendMode, Brush, Point, Size};

/// Painting operations
///
/// Blend modes form a stack: every push must be matched by a pop. Popping
/// past the base entry is ignored.
pub trait DrawContext {
    /// Clear the entire surface to fully transparent
    fn clear(&mut self);

    fn push_blend_mode(&mut self, mode: BlendMode);

    fn pop_blend_mode(&mut self);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    /// Logical size of the surface
    fn viewport_size(&self) -> Size;

    /// Update the logical size after the host surface was resized
    fn set_viewport_size(&mut self, size: Size);

    /// Blend mode on top of the stack
    fn current_blend_mode(&self) -> BlendMode;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// One recorded painting operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    PushBlendMode(BlendMode),
    PopBlendMode,
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
}

/// A draw context that keeps the commands of the current frame
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    blend_modes: SmallVec<[BlendMode; 2]>,
    viewport: Size,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl RecordingContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            blend_modes: smallvec![BlendMode::Normal],
            viewport,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last `Clear`
    ///
    /// This is what would be visible on screen right now.
    pub fn visible_commands(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Forget every recorded command and blend mode
    pub fn reset(&mut self) {
        self.commands.clear();
        self.blend_modes = smallvec![BlendMode::Normal];
    }
}

impl DrawContext for RecordingContext {
    fn clear(&mut self) {
        // Everything before a clear is invisible, so don't keep it around
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::PushBlendMode(mode));
        self.blend_modes.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.commands.push(DrawCommand::PopBlendMode);
        if self.blend_modes.len() > 1 {
            self.blend_modes.pop();
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn set_viewport_size(&mut self, size: Size) {
        tracing::trace!(
            "RecordingContext: viewport {}x{}",
            size.width,
            size.height
        );
        self.viewport = size;
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.blend_modes.last().copied().unwrap_or_default()
    }
}
