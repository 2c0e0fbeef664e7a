//! Input event types

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer (mouse, pen or primary touch) event
    Pointer(PointerEvent),
}

/// Pointer events
///
/// Coordinates are in viewport (logical) pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to position
    Moved {
        /// X position in viewport coordinates
        x: f32,
        /// Y position in viewport coordinates
        y: f32,
    },
    /// Pointer entered the viewport
    Entered,
    /// Pointer left the viewport
    Left,
}

impl InputEvent {
    /// Shorthand for a pointer move
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        InputEvent::Pointer(PointerEvent::Moved { x, y })
    }

    /// Position carried by the event, if any
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            InputEvent::Pointer(PointerEvent::Moved { x, y }) => Some((*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_position() {
        assert_eq!(InputEvent::pointer_moved(3.0, 4.0).position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::Pointer(PointerEvent::Left).position(), None);
    }
}
