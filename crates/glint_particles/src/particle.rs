//! Individual particle data and the bounded live set

use std::collections::VecDeque;

use glint_core::{Point, Vec2};

/// A single trail particle
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position (px)
    pub position: Point,
    /// Current velocity (px per frame)
    pub velocity: Vec2,
    /// Frames simulated since spawn
    pub age: u32,
    /// Frames the particle lives for
    pub lifespan: u32,
    /// Core radius (px)
    pub radius: f32,
    /// Hue in degrees, fixed for the particle's life
    pub hue: f32,
}

impl Particle {
    pub fn new(position: Point, velocity: Vec2, lifespan: u32) -> Self {
        Self {
            position,
            velocity,
            age: 0,
            lifespan,
            radius: 1.0,
            hue: 0.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = hue;
        self
    }

    /// Get normalized age (0 = just spawned, 1 = expired)
    pub fn normalized_age(&self) -> f32 {
        if self.lifespan == 0 {
            return 1.0;
        }
        (self.age as f32 / self.lifespan as f32).clamp(0.0, 1.0)
    }

    /// Opacity, fading linearly to 0 at the end of life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.normalized_age()).max(0.0)
    }

    /// Check if the particle should be removed
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Advance one frame
    pub fn advance(&mut self, gravity: f32, friction: f32) {
        self.position = self.position.offset(self.velocity);
        self.velocity.y += gravity;
        self.velocity.x *= friction;
        self.age = self.age.saturating_add(1);
    }
}

/// Live particles in insertion order, oldest first
///
/// Pushing never evicts; [`ParticleSet::enforce_capacity`] trims the oldest
/// entries once the simulation pass is done.
#[derive(Clone, Debug)]
pub struct ParticleSet {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl ParticleSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no further spawns are allowed
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Change the capacity; excess particles are dropped on the next
    /// [`ParticleSet::enforce_capacity`]
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push_back(particle);
    }

    /// Advance every particle and drop the expired ones in a single pass
    ///
    /// Returns the number of particles removed.
    pub fn advance_and_prune(&mut self, gravity: f32, friction: f32) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.advance(gravity, friction);
            !p.is_expired()
        });
        before - self.particles.len()
    }

    /// Drop the oldest particles until the set fits its capacity
    pub fn enforce_capacity(&mut self) -> usize {
        let excess = self.particles.len().saturating_sub(self.capacity);
        self.particles.drain(..excess);
        excess
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::collections::vec_deque::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
