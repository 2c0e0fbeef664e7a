//! Host events

use std::time::Duration;

use crate::host::FrameRequestId;
use crate::input::InputEvent;

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the event loop
    #[default]
    Continue,
    /// Exit the event loop
    Exit,
}

/// Host events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event
    Input(InputEvent),
    /// A previously requested animation frame is due
    ///
    /// Delivered once per request, right before the host paints. The
    /// timestamp is the host's frame time measured from an arbitrary epoch,
    /// monotonic across frames.
    Frame {
        /// The request this frame answers
        request: FrameRequestId,
        /// Frame time
        timestamp: Duration,
    },
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport was resized
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
    /// Display scale factor changed
    ScaleFactorChanged {
        /// New scale factor
        scale_factor: f64,
    },
    /// Window close was requested
    CloseRequested,
}

impl Event {
    /// True for events that change the viewport geometry
    pub fn is_viewport_change(&self) -> bool {
        matches!(
            self,
            Event::Window(WindowEvent::Resized { .. })
                | Event::Window(WindowEvent::ScaleFactorChanged { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }

    #[test]
    fn test_viewport_change() {
        let resized = Event::Window(WindowEvent::Resized {
            width: 10.0,
            height: 10.0,
        });
        assert!(resized.is_viewport_change());
        assert!(!Event::Window(WindowEvent::CloseRequested).is_viewport_change());
        assert!(!Event::Input(InputEvent::pointer_moved(0.0, 0.0)).is_viewport_change());
    }
}
