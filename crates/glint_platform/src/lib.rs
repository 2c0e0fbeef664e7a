//! Glint Platform Abstraction Layer
//!
//! Effects never talk to a browser or window system directly. They see a
//! [`Host`] that schedules animation frames, reports the viewport and
//! delivers [`Event`]s.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glint_platform::{ControlFlow, Event, HeadlessHost, Host};
//!
//! let host = HeadlessHost::default();
//! host.request_animation_frame();
//!
//! let mut frames = 0;
//! host.run(5, Duration::from_millis(16), |host, event| {
//!     if let Event::Frame { .. } = event {
//!         frames += 1;
//!         host.request_animation_frame();
//!     }
//!     ControlFlow::Continue
//! })
//! .unwrap();
//!
//! assert_eq!(frames, 5);
//! ```

mod error;
mod event;
mod headless;
mod host;
mod input;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, WindowEvent};
pub use headless::HeadlessHost;
pub use host::{FrameRequestId, Host, ListenerId, Viewport};
pub use input::{InputEvent, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, WindowEvent};
    pub use crate::host::{FrameRequestId, Host, ListenerId, Viewport};
    pub use crate::input::{InputEvent, PointerEvent};
}
