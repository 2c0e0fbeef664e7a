//! Particle field simulation
//!
//! One executed frame runs, in order: the movement-gated spawn, kinematics
//! for every particle (the newly spawned one included), pruning of expired
//! particles, and capacity eviction of the oldest. Frames arriving sooner
//! than the configured interval after the last executed one do nothing.

use std::time::Duration;

use glint_animation::FrameGate;
use glint_core::{Point, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{Interval, ParticleConfig};
use crate::particle::{Particle, ParticleSet};

/// Bookkeeping for one executed frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// A particle was spawned this frame
    pub spawned: bool,
    /// Particles removed for reaching their lifespan
    pub expired: usize,
    /// Particles removed to respect capacity
    pub evicted: usize,
    /// Particles alive after the frame
    pub live: usize,
}

/// Result of offering a frame to the field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame arrived before the interval elapsed
    Skipped,
    /// The simulation advanced
    Executed(FrameStats),
}

impl FrameOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, FrameOutcome::Executed(_))
    }

    pub fn stats(&self) -> Option<FrameStats> {
        match self {
            FrameOutcome::Executed(stats) => Some(*stats),
            FrameOutcome::Skipped => None,
        }
    }
}

/// The pointer-trail simulation
pub struct ParticleField<R = StdRng> {
    config: ParticleConfig,
    particles: ParticleSet,
    rng: R,
    gate: FrameGate,
    last_spawn: Point,
    frames_executed: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Create an empty field
    ///
    /// `initial_pointer` seeds the last-spawn position, so a pointer that
    /// never moves never spawns. `config` is expected to have passed
    /// [`ParticleConfig::validate`].
    pub fn new(config: ParticleConfig, rng: R, initial_pointer: Point) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated particle config");
        let particles = ParticleSet::new(config.capacity);
        let gate = FrameGate::new(config.frame_interval());
        Self {
            config,
            particles,
            rng,
            gate,
            last_spawn: initial_pointer,
            frames_executed: 0,
        }
    }

    /// Offer a host frame at time `now` with the current pointer position
    pub fn step(&mut self, now: Duration, pointer: Point) -> FrameOutcome {
        if !self.gate.try_enter(now) {
            return FrameOutcome::Skipped;
        }
        self.frames_executed += 1;

        let spawned = self.try_spawn(pointer);
        let expired = self
            .particles
            .advance_and_prune(self.config.gravity, self.config.friction);
        let evicted = self.particles.enforce_capacity();
        if evicted > 0 {
            tracing::debug!(
                "ParticleField: evicted {} particles over capacity {}",
                evicted,
                self.particles.capacity()
            );
        }

        let stats = FrameStats {
            spawned,
            expired,
            evicted,
            live: self.particles.len(),
        };
        tracing::trace!(
            frame = self.frames_executed,
            spawned,
            expired,
            evicted,
            live = stats.live,
            "particle frame"
        );
        FrameOutcome::Executed(stats)
    }

    /// Spawn at most one particle at the pointer
    ///
    /// A full set never spawns, so eviction in [`Self::step`] only trims
    /// after [`Self::set_capacity`] lowers the bound.
    fn try_spawn(&mut self, pointer: Point) -> bool {
        if pointer.distance(self.last_spawn) <= self.config.movement_threshold {
            return false;
        }
        if self.particles.is_full() {
            return false;
        }
        if self.rng.gen::<f32>() >= self.config.spawn_probability {
            return false;
        }

        let particle = self.spawn_at(pointer);
        self.particles.push(particle);
        self.last_spawn = pointer;
        true
    }

    fn spawn_at(&mut self, pointer: Point) -> Particle {
        let config = &self.config;
        let rng = &mut self.rng;

        let jitter = Interval::symmetric(config.jitter);
        let speed = Interval::symmetric(config.velocity);
        let position = pointer.offset(Vec2::new(jitter.sample(rng), jitter.sample(rng)));
        let velocity = Vec2::new(speed.sample(rng), speed.sample(rng));

        Particle::new(position, velocity, config.lifespan.sample(rng))
            .with_radius(config.radius.sample(rng))
            .with_hue(config.hue.sample(rng))
    }

    /// Change the particle capacity
    ///
    /// A lower capacity takes effect on the next executed frame, which
    /// evicts the oldest particles.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.config.capacity = capacity;
        self.particles.set_capacity(capacity);
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Pointer position at the most recent spawn
    pub fn last_spawn(&self) -> Point {
        self.last_spawn
    }

    /// Number of frames that passed the frame gate
    pub fn frames_executed(&self) -> u64 {
        self.frames_executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn always_spawn() -> ParticleConfig {
        ParticleConfig {
            spawn_probability: 1.0,
            ..Default::default()
        }
    }

    fn field(config: ParticleConfig) -> ParticleField {
        ParticleField::new(config, StdRng::seed_from_u64(42), Point::ZERO)
    }

    #[test]
    fn test_first_frame_executes_then_gates() {
        let mut field = field(ParticleConfig::default());
        let interval = field.config().frame_interval();

        assert!(field.step(Duration::from_secs(5), Point::ZERO).is_executed());
        assert_eq!(
            field.step(Duration::from_secs(5) + interval / 2, Point::ZERO),
            FrameOutcome::Skipped
        );
        assert!(field
            .step(Duration::from_secs(5) + interval, Point::ZERO)
            .is_executed());
        assert_eq!(field.frames_executed(), 2);
    }

    #[test]
    fn test_skipped_frame_has_no_effect() {
        let mut field = field(always_spawn());
        field.step(Duration::ZERO, Point::ZERO);

        // Pointer far away, but the frame is too early
        let outcome = field.step(Duration::from_millis(1), Point::new(100.0, 100.0));
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert!(field.particles().is_empty());
        assert_eq!(field.last_spawn(), Point::ZERO);
    }

    #[test]
    fn test_spawned_particle_is_advanced_same_frame() {
        let mut field = field(always_spawn());
        let stats = field
            .step(Duration::ZERO, Point::new(50.0, 50.0))
            .stats()
            .unwrap();

        assert!(stats.spawned);
        assert_eq!(stats.live, 1);
        let p = field.particles().iter().next().unwrap();
        assert_eq!(p.age, 1);
        assert!(field.config().lifespan.contains(p.lifespan));
        assert!(field.config().radius.contains(p.radius));
        assert!(field.config().hue.contains(p.hue));
        assert_eq!(field.last_spawn(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_movement_threshold() {
        let mut field = field(always_spawn());
        let interval = field.config().frame_interval();

        // Exactly at the threshold is not enough
        let outcome = field.step(Duration::ZERO, Point::new(4.0, 0.0));
        assert!(!outcome.stats().unwrap().spawned);

        let outcome = field.step(interval, Point::new(4.5, 0.0));
        assert!(outcome.stats().unwrap().spawned);

        // Travel is measured from the last spawn, not the last frame
        let outcome = field.step(interval * 2, Point::new(7.0, 0.0));
        assert!(!outcome.stats().unwrap().spawned);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let config = ParticleConfig {
            spawn_probability: 0.0,
            ..Default::default()
        };
        let mut field = field(config);
        let interval = field.config().frame_interval();

        for i in 0..100u32 {
            field.step(interval * i, Point::new(i as f32 * 10.0, 0.0));
        }
        assert!(field.particles().is_empty());
    }

    #[test]
    fn test_lowered_capacity_evicts_on_next_frame() {
        let mut field = field(ParticleConfig {
            lifespan: Interval::new(1_000, 1_000),
            ..always_spawn()
        });
        let interval = field.config().frame_interval();

        for i in 0..10u32 {
            field.step(interval * i, Point::new((i + 1) as f32 * 10.0, 0.0));
        }
        assert_eq!(field.particles().len(), 10);

        field.set_capacity(4);
        assert_eq!(field.particles().len(), 10);

        let stats = field.step(interval * 10, Point::new(0.0, 0.0)).stats().unwrap();
        assert!(!stats.spawned);
        assert_eq!(stats.evicted, 6);
        assert_eq!(stats.live, 4);
    }

    #[test]
    fn test_full_set_stops_spawning_without_evicting() {
        let mut field = field(ParticleConfig {
            capacity: 3,
            lifespan: Interval::new(1_000, 1_000),
            ..always_spawn()
        });
        let interval = field.config().frame_interval();

        for i in 0..8u32 {
            let stats = field
                .step(interval * i, Point::new((i + 1) as f32 * 10.0, 0.0))
                .stats()
                .unwrap();
            assert_eq!(stats.spawned, i < 3);
            assert_eq!(stats.evicted, 0);
        }
        assert_eq!(field.particles().len(), 3);
        // Pointer travel keeps accumulating from the last spawn
        assert_eq!(field.last_spawn(), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_late_timestamps_keep_executing() {
        let mut field = field(ParticleConfig::default());
        let step_nanos = field.config().frame_interval().as_nanos() as u64;

        // Frame counts past u32::MAX
        let start = u64::from(u32::MAX) - 2;
        for frame in start..start + 6 {
            let now = Duration::from_nanos(step_nanos * frame);
            assert!(field.step(now, Point::ZERO).is_executed());
        }
        assert_eq!(field.frames_executed(), 6);
    }
}
