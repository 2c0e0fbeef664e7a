//! Glint Particles
//!
//! An ambient pointer-trail overlay. Moving the pointer sheds short-lived
//! glowing particles that drift, fall, fade and disappear.
//!
//! # Features
//!
//! - **Movement-gated spawning**: at most one particle per frame, only after
//!   the pointer has travelled past a threshold since the last spawn
//! - **Bounded set**: a fixed capacity, oldest evicted first
//! - **Frame gating**: the simulation runs at a fixed rate however fast the
//!   host refreshes
//! - **Input-inert surface**: a full-viewport canvas with screen blending
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glint_core::{Point, RecordingContext};
//! use glint_particles::{CanvasSurface, ParticleConfig, ParticleOverlay, PointerState};
//! use glint_platform::{ControlFlow, HeadlessHost};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let host = HeadlessHost::default();
//! let pointer = PointerState::new(Point::new(400.0, 300.0));
//! let config = ParticleConfig::default();
//! let interval = config.frame_interval();
//!
//! let mut overlay = ParticleOverlay::mount(
//!     &host,
//!     Some(CanvasSurface::default()),
//!     config,
//!     pointer.clone(),
//!     StdRng::seed_from_u64(0),
//! )
//! .unwrap();
//! let mut ctx = RecordingContext::new(overlay.surface().logical_size());
//!
//! host.run(60, interval, |host, event| {
//!     overlay.handle_event(host, &event, &mut ctx);
//!     ControlFlow::Continue
//! })
//! .unwrap();
//!
//! // The pointer never moved
//! assert!(overlay.particles().is_empty());
//! overlay.unmount(&host);
//! ```

pub mod config;
pub mod field;
pub mod overlay;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod surface;

pub use config::{ConfigError, Interval, ParticleConfig};
pub use field::{FrameOutcome, FrameStats, ParticleField};
pub use overlay::ParticleOverlay;
pub use particle::{Particle, ParticleSet};
pub use pointer::PointerState;
pub use render::{paint_particles, particle_color};
pub use surface::CanvasSurface;
