//! Particle overlay configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! capacity = 40
//! spawn_probability = 0.5
//!
//! [lifespan]
//! min = 30
//! max = 45
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serializing the config failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Closed interval `[min, max]` a random attribute is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl Interval<f32> {
    /// `[-extent, extent]`
    pub fn symmetric(extent: f32) -> Self {
        Self::new(-extent, extent)
    }

    /// True when both ends and the width between them are finite
    pub fn is_bounded(&self) -> bool {
        (self.max - self.min).is_finite()
    }

    /// Draw a value; degenerate or unbounded intervals yield `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max || !self.is_bounded() {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

impl Interval<u32> {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Tuning values for the pointer-trail overlay
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Maximum number of live particles
    pub capacity: usize,
    /// Chance that an eligible frame spawns a particle
    pub spawn_probability: f32,
    /// Pointer travel (px) since the last spawn required to spawn again
    pub movement_threshold: f32,
    /// Spawn offset from the pointer, per axis, in `[-jitter, jitter]`
    pub jitter: f32,
    /// Initial velocity, per axis, in `[-velocity, velocity]` px/frame
    pub velocity: f32,
    /// Added to the vertical velocity every frame
    pub gravity: f32,
    /// Horizontal velocity multiplier per frame
    pub friction: f32,
    /// Glyph outer radius as a multiple of the core radius
    pub glow: f32,
    /// Minimum time between simulated frames
    pub frame_interval_ms: f64,
    /// Cap on the device pixel ratio used to size the backing surface
    pub max_device_pixel_ratio: f32,
    /// Lifespan in frames
    pub lifespan: Interval<u32>,
    /// Core radius in px
    pub radius: Interval<f32>,
    /// Hue in degrees
    pub hue: Interval<f32>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            spawn_probability: 0.3,
            movement_threshold: 4.0,
            jitter: 25.0,
            velocity: 1.0,
            gravity: 0.05,
            friction: 0.99,
            glow: 5.0,
            frame_interval_ms: 1000.0 / 60.0,
            max_device_pixel_ratio: 2.0,
            lifespan: Interval::new(60, 100),
            radius: Interval::new(1.0, 4.0),
            hue: Interval::new(220.0, 340.0),
        }
    }
}

impl ParticleConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ParticleConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded particle config from {}", path.display());
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Target frame interval as a duration
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos((self.frame_interval_ms * 1_000_000.0) as u64)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.capacity == 0 {
            return invalid("capacity must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return invalid(format!(
                "spawn_probability {} is outside [0, 1]",
                self.spawn_probability
            ));
        }
        for (name, value) in [
            ("movement_threshold", self.movement_threshold),
            ("jitter", self.jitter),
            ("velocity", self.velocity),
            ("glow", self.glow),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{} must be a non-negative number", name));
            }
        }
        for (name, extent) in [("jitter", self.jitter), ("velocity", self.velocity)] {
            if !Interval::symmetric(extent).is_bounded() {
                return invalid(format!("{} {} is too large", name, extent));
            }
        }
        if !self.gravity.is_finite() {
            return invalid("gravity must be finite".to_string());
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return invalid(format!("friction {} is outside (0, 1]", self.friction));
        }
        if !self.lifespan.is_ordered() || self.lifespan.min == 0 {
            return invalid(format!(
                "lifespan [{}, {}] must be ordered and start at 1 or more",
                self.lifespan.min, self.lifespan.max
            ));
        }
        for (name, interval) in [("radius", self.radius), ("hue", self.hue)] {
            if !interval.is_bounded() || !interval.is_ordered() {
                return invalid(format!(
                    "{} [{}, {}] must be finite and ordered",
                    name, interval.min, interval.max
                ));
            }
        }
        if self.radius.min < 0.0 {
            return invalid("radius must be non-negative".to_string());
        }
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return invalid("frame_interval_ms must be positive".to_string());
        }
        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio > 0.0) {
            return invalid("max_device_pixel_ratio must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_animation::DEFAULT_FRAME_INTERVAL;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_valid() {
        let config = ParticleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_interval(), DEFAULT_FRAME_INTERVAL);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ParticleConfig::from_toml_str(
            r#"
            capacity = 40
            spawn_probability = 1.0

            [lifespan]
            min = 30
            max = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.capacity, 40);
        assert_eq!(config.spawn_probability, 1.0);
        assert_eq!(config.lifespan, Interval::new(30, 30));
        assert_eq!(config.gravity, ParticleConfig::default().gravity);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ParticleConfig {
            capacity: 12,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ParticleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let cases = [
            "capacity = 0",
            "spawn_probability = 1.5",
            "friction = 0.0",
            "jitter = -1.0",
            "frame_interval_ms = 0.0",
            "[lifespan]\nmin = 10\nmax = 5",
            "[lifespan]\nmin = 0\nmax = 5",
            "[hue]\nmin = 300.0\nmax = 200.0",
            // Spans that overflow f32
            "jitter = 3.0e38",
            "velocity = 3.0e38",
            "[hue]\nmin = -3.0e38\nmax = 3.0e38",
            "[radius]\nmin = 0.0\nmax = inf",
        ];
        for case in cases {
            assert!(
                matches!(
                    ParticleConfig::from_toml_str(case),
                    Err(ConfigError::Invalid(_))
                ),
                "expected rejection of {:?}",
                case
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ParticleConfig::from_toml_str("capacity = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParticleConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_interval_sampling_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let hue = Interval::new(220.0_f32, 340.0);
        let life = Interval::new(60_u32, 100);

        for _ in 0..1_000 {
            assert!(hue.contains(hue.sample(&mut rng)));
            assert!(life.contains(life.sample(&mut rng)));
        }
        assert_eq!(Interval::symmetric(0.0).sample(&mut rng), 0.0);
        assert_eq!(Interval::new(5_u32, 5).sample(&mut rng), 5);
    }

    #[test]
    fn test_unbounded_interval_samples_min() {
        let mut rng = StdRng::seed_from_u64(7);
        let wide = Interval::symmetric(3.0e38);
        assert!(!wide.is_bounded());
        assert_eq!(wide.sample(&mut rng), -3.0e38);
        assert!(Interval::symmetric(25.0).is_bounded());
    }
}
