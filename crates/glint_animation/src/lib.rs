//! Glint Animation System
//!
//! Frame pacing and the timed effects of the page intro.
//!
//! # Features
//!
//! - **Frame Gating**: cap per-frame work at a target rate regardless of how
//!   often the host fires frames
//! - **Frame Loops**: a self re-arming frame request with terminal cancellation
//! - **Typewriter**: character-by-character text reveal with a blinking cursor
//! - **Skill Counters**: staggered percentage count-ups
//! - **Scheduler**: registry that ticks typewriters and counters each frame

pub mod counter;
pub mod frame;
pub mod scheduler;
pub mod typewriter;

pub use counter::{SkillCounter, COUNT_STEPS, COUNT_STEP_MS, STAGGER_MS};
pub use frame::{FrameGate, FrameLoop, LoopState, DEFAULT_FRAME_INTERVAL};
pub use scheduler::{
    AnimatedCounter, AnimatedText, AnimationScheduler, CounterId, SchedulerHandle, TypewriterId,
};
pub use typewriter::{Typewriter, TypewriterConfig};
