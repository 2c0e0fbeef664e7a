//! In-memory host used by tests and the command-line runner
//!
//! `HeadlessHost` behaves like a browser tab with no pixels: frame requests
//! are answered on the next [`HeadlessHost::advance`], resize notifications
//! are queued only while someone listens, and time only moves when told to.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::error::{PlatformError, Result};
use crate::event::{ControlFlow, Event, WindowEvent};
use crate::host::{FrameRequestId, Host, ListenerId, Viewport};
use crate::input::InputEvent;

struct HeadlessState {
    clock: Duration,
    viewport: Viewport,
    next_request: u64,
    next_listener: u64,
    pending_frames: Vec<FrameRequestId>,
    resize_listeners: FxHashSet<ListenerId>,
    queued: VecDeque<Event>,
}

/// A host with a manual clock
pub struct HeadlessHost {
    state: RefCell<HeadlessState>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: RefCell::new(HeadlessState {
                clock: Duration::ZERO,
                viewport,
                next_request: 1,
                next_listener: 1,
                pending_frames: Vec::new(),
                resize_listeners: FxHashSet::default(),
                queued: VecDeque::new(),
            }),
        }
    }

    /// Current host time
    pub fn now(&self) -> Duration {
        self.state.borrow().clock
    }

    /// Number of frame requests waiting for the next advance
    pub fn pending_frame_requests(&self) -> usize {
        self.state.borrow().pending_frames.len()
    }

    /// Number of registered resize listeners
    pub fn listener_count(&self) -> usize {
        self.state.borrow().resize_listeners.len()
    }

    /// Change the viewport, notifying resize listeners
    pub fn set_viewport(&self, viewport: Viewport) {
        let mut state = self.state.borrow_mut();
        let previous = state.viewport;
        state.viewport = viewport;

        if state.resize_listeners.is_empty() {
            return;
        }
        if previous.width != viewport.width || previous.height != viewport.height {
            state.queued.push_back(Event::Window(WindowEvent::Resized {
                width: viewport.width,
                height: viewport.height,
            }));
        }
        if previous.scale_factor != viewport.scale_factor {
            state
                .queued
                .push_back(Event::Window(WindowEvent::ScaleFactorChanged {
                    scale_factor: viewport.scale_factor,
                }));
        }
    }

    /// Queue a pointer move
    pub fn move_pointer(&self, x: f32, y: f32) {
        self.push_event(Event::Input(InputEvent::pointer_moved(x, y)));
    }

    /// Queue an arbitrary event for the next advance
    pub fn push_event(&self, event: Event) {
        self.state.borrow_mut().queued.push_back(event);
    }

    /// Move the clock forward and collect due events
    ///
    /// Queued events come first, in order, followed by one `Frame` per frame
    /// request made before this call. Requests made while the returned
    /// events are handled are answered by the following advance.
    pub fn advance(&self, dt: Duration) -> Vec<Event> {
        let mut state = self.state.borrow_mut();
        state.clock += dt;
        let timestamp = state.clock;

        let mut events: Vec<Event> = state.queued.drain(..).collect();
        events.extend(
            state
                .pending_frames
                .drain(..)
                .map(|request| Event::Frame { request, timestamp }),
        );
        events
    }

    /// Drive `frames` display refreshes spaced `interval` apart
    ///
    /// The handler gets every event in delivery order and may return
    /// [`ControlFlow::Exit`] to stop early.
    pub fn run<F>(&self, frames: usize, interval: Duration, mut handler: F) -> Result<()>
    where
        F: FnMut(&Self, Event) -> ControlFlow,
    {
        if interval.is_zero() {
            return Err(PlatformError::EventLoop(
                "refresh interval must be non-zero".to_string(),
            ));
        }

        for _ in 0..frames {
            for event in self.advance(interval) {
                if handler(self, event) == ControlFlow::Exit {
                    tracing::debug!("HeadlessHost: handler requested exit");
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Host for HeadlessHost {
    fn request_animation_frame(&self) -> FrameRequestId {
        let mut state = self.state.borrow_mut();
        let id = FrameRequestId(state.next_request);
        state.next_request += 1;
        state.pending_frames.push(id);
        id
    }

    fn cancel_animation_frame(&self, id: FrameRequestId) {
        self.state
            .borrow_mut()
            .pending_frames
            .retain(|pending| *pending != id);
    }

    fn add_resize_listener(&self) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.resize_listeners.insert(id);
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state.borrow_mut().resize_listeners.remove(&id);
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }
}
