//! Frame pacing
//!
//! [`FrameGate`] caps how often per-frame work runs, independent of how often
//! the host fires animation frames. [`FrameLoop`] tracks the self re-arming
//! frame request of a mounted effect so that cancellation is total: once
//! cancelled, any frame that still arrives is ignored.

use std::time::Duration;

use glint_platform::{FrameRequestId, Host};

/// Target interval for 60 Hz work
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Skips frames that arrive sooner than the target interval
#[derive(Clone, Copy, Debug)]
pub struct FrameGate {
    interval: Duration,
    last: Option<Duration>,
}

impl FrameGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Gate for a target frame rate
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1))))
    }

    /// Decide whether a frame at `now` should run
    ///
    /// The first frame always runs. Afterwards a frame runs only when at
    /// least one interval has passed since the last frame that ran, and
    /// only running frames move the reference point. A timestamp earlier
    /// than the last run frame is skipped.
    pub fn try_enter(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time of the last frame that ran
    pub fn last_frame(&self) -> Option<Duration> {
        self.last
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Forget the last frame so the next one runs unconditionally
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

/// State of a self re-arming frame loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Not waiting on a frame (before the first request, or while a frame runs)
    Idle,
    /// Waiting for the given frame request
    Scheduled(FrameRequestId),
    /// Stopped for good
    Cancelled,
}

/// Bookkeeping for a frame callback that re-requests itself
///
/// `Cancelled` is terminal: [`FrameLoop::schedule`] stops requesting frames
/// and [`FrameLoop::accept`] rejects every frame afterwards.
#[derive(Clone, Copy, Debug)]
pub struct FrameLoop {
    state: LoopState,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, LoopState::Scheduled(_))
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == LoopState::Cancelled
    }

    /// Request the next frame from the host
    ///
    /// Returns `None` without touching the host once cancelled, and keeps
    /// the existing request if one is already pending.
    pub fn schedule(&mut self, host: &dyn Host) -> Option<FrameRequestId> {
        match self.state {
            LoopState::Cancelled => None,
            LoopState::Scheduled(id) => Some(id),
            LoopState::Idle => {
                let id = host.request_animation_frame();
                self.state = LoopState::Scheduled(id);
                Some(id)
            }
        }
    }

    /// Claim an arriving frame
    ///
    /// True only for the pending request; the loop goes back to `Idle`
    /// until it is scheduled again.
    pub fn accept(&mut self, request: FrameRequestId) -> bool {
        match self.state {
            LoopState::Scheduled(pending) if pending == request => {
                self.state = LoopState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Stop the loop, cancelling any pending request with the host
    pub fn cancel(&mut self, host: &dyn Host) -> Option<FrameRequestId> {
        let pending = match self.state {
            LoopState::Scheduled(id) => {
                host.cancel_animation_frame(id);
                tracing::trace!("FrameLoop: cancelled pending request {:?}", id);
                Some(id)
            }
            _ => None,
        };
        self.state = LoopState::Cancelled;
        pending
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
