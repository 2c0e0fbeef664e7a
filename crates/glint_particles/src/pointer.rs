//! Shared pointer position

use std::cell::Cell;
use std::rc::Rc;

use glint_core::Point;
use glint_platform::{InputEvent, PointerEvent};

/// Latest pointer position, shared between the input listener and the overlay
///
/// Clones share the same cell. Everything runs on the host's UI thread, so
/// a plain `Rc<Cell<_>>` is enough.
#[derive(Clone, Debug, Default)]
pub struct PointerState(Rc<Cell<Point>>);

impl PointerState {
    pub fn new(initial: Point) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> Point {
        self.0.get()
    }

    pub fn set(&self, position: Point) {
        self.0.set(position);
    }

    /// Record a pointer move; other events are ignored
    ///
    /// Returns true if the position changed.
    pub fn apply(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer(PointerEvent::Moved { x, y }) => {
                self.set(Point::new(*x, *y));
                true
            }
            _ => false,
        }
    }
}
