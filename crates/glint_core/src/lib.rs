//! Glint Core
//!
//! Foundational value types for Glint's ambient page effects:
//!
//! - **Geometry**: points, sizes and vectors in viewport pixels
//! - **Color**: RGBA colors with HSLA construction
//! - **Brushes**: solid fills and radial gradients
//! - **Draw Context**: the painting API effects render through, plus a
//!   recording implementation for headless hosts and tests

pub mod draw;
pub mod layer;

pub use draw::{DrawCommand, DrawContext, RecordingContext};
pub use layer::{BlendMode, Brush, Color, Gradient, GradientStop, Point, PointerEvents, Size, Vec2};
