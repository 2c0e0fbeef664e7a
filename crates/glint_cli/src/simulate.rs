//! Headless particle overlay runs

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use glint_core::{Point, RecordingContext};
use glint_particles::{CanvasSurface, FrameOutcome, ParticleConfig, ParticleOverlay, PointerState};
use glint_platform::{ControlFlow, Event, HeadlessHost, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

/// How the simulated pointer moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PointerPath {
    /// Parked in the middle of the viewport
    Stationary,
    /// Left to right across the middle, once over the whole run
    Line,
    /// Circling the center once per second
    Circle,
}

impl PointerPath {
    /// Pointer position at display refresh `frame` of `frames`
    pub fn position(self, frame: usize, frames: usize, viewport: Viewport) -> Point {
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        match self {
            PointerPath::Stationary => center,
            PointerPath::Line => {
                let t = frame as f32 / frames.max(1) as f32;
                Point::new(viewport.width * (0.1 + 0.8 * t.min(1.0)), center.y)
            }
            PointerPath::Circle => {
                let radius = viewport.width.min(viewport.height) * 0.3;
                let angle = TAU * frame as f32 / 60.0;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            }
        }
    }
}

/// A viewport change at a given refresh, written `WIDTHxHEIGHT@FRAME`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeAt {
    pub width: f32,
    pub height: f32,
    pub frame: usize,
}

impl FromStr for ResizeAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT@FRAME, got '{}'", s))?;
        let (width, height) = size
            .split_once('x')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", size))?;

        let parse_dim = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid dimension '{}': {}", v, e))
        };
        Ok(Self {
            width: parse_dim(width)?,
            height: parse_dim(height)?,
            frame: frame
                .trim()
                .parse()
                .map_err(|e| format!("invalid frame '{}': {}", frame, e))?,
        })
    }
}

impl fmt::Display for ResizeAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.frame)
    }
}

/// Inputs to one run
#[derive(Clone, Debug)]
pub struct SimulateOptions {
    pub frames: usize,
    pub path: PointerPath,
    pub config: ParticleConfig,
    pub seed: u64,
    pub viewport: Viewport,
    pub resize: Option<ResizeAt>,
}

/// Totals reported at the end of a run
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub frames_delivered: usize,
    pub frames_executed: usize,
    pub spawned: usize,
    pub expired: usize,
    pub evicted: usize,
    pub peak_live: usize,
    pub final_live: usize,
    pub surface_pixels: (u32, u32),
}

impl SimulationSummary {
    fn record(&mut self, outcome: FrameOutcome) {
        self.frames_delivered += 1;
        if let Some(stats) = outcome.stats() {
            self.frames_executed += 1;
            self.spawned += usize::from(stats.spawned);
            self.expired += stats.expired;
            self.evicted += stats.evicted;
            self.peak_live = self.peak_live.max(stats.live);
            self.final_live = stats.live;
        }
    }
}

/// Run the overlay on a headless host for `options.frames` refreshes
pub fn run(options: &SimulateOptions) -> Result<SimulationSummary> {
    let viewport = options.viewport;
    let resize = options
        .resize
        .map(|at| {
            Viewport::try_new(at.width, at.height, viewport.scale_factor).map(|to| (at.frame, to))
        })
        .transpose()
        .context("invalid resize viewport")?;
    let host = HeadlessHost::new(viewport);
    let pointer = PointerState::new(options.path.position(0, options.frames, viewport));
    let interval = options.config.frame_interval();

    let mut overlay = ParticleOverlay::mount(
        &host,
        Some(CanvasSurface::new(options.config.max_device_pixel_ratio)),
        options.config.clone(),
        pointer.clone(),
        StdRng::seed_from_u64(options.seed),
    )
    .context("overlay did not mount")?;
    let mut ctx = RecordingContext::new(overlay.surface().logical_size());

    info!(
        "Simulating {} frames ({:?} pointer, capacity {}, seed {})",
        options.frames, options.path, options.config.capacity, options.seed
    );

    let mut summary = SimulationSummary::default();
    let first = options.path.position(1, options.frames, viewport);
    host.move_pointer(first.x, first.y);

    host.run(options.frames, interval, |host, event| {
        if let Event::Input(input) = &event {
            pointer.apply(input);
        }
        let Some(outcome) = overlay.handle_event(host, &event, &mut ctx) else {
            return ControlFlow::Continue;
        };
        summary.record(outcome);

        let delivered = summary.frames_delivered;
        if delivered % 60 == 0 {
            info!(
                "t={:>3}s live={:>3} spawned={} expired={} evicted={}",
                delivered / 60,
                overlay.particles().len(),
                summary.spawned,
                summary.expired,
                summary.evicted
            );
        }

        if let Some((_, to)) = resize.filter(|(frame, _)| *frame == delivered) {
            debug!("Resizing viewport to {}x{}", to.width, to.height);
            host.set_viewport(to);
        }

        let next = options.path.position(delivered + 1, options.frames, viewport);
        host.move_pointer(next.x, next.y);
        ControlFlow::Continue
    })
    .context("headless host failed")?;

    overlay.unmount(&host);
    summary.final_live = overlay.particles().len();
    summary.surface_pixels = overlay.surface().pixel_size();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(path: PointerPath) -> SimulateOptions {
        SimulateOptions {
            frames: 120,
            path,
            config: ParticleConfig::default(),
            seed: 3,
            viewport: Viewport::new(800.0, 600.0),
            resize: None,
        }
    }

    #[test]
    fn test_parse_resize() {
        let resize: ResizeAt = "1600x1200@30".parse().unwrap();
        assert_eq!(
            resize,
            ResizeAt {
                width: 1600.0,
                height: 1200.0,
                frame: 30
            }
        );
        assert_eq!(resize.to_string(), "1600x1200@30");
        assert!("1600x1200".parse::<ResizeAt>().is_err());
        assert!("widex1200@3".parse::<ResizeAt>().is_err());
    }

    #[test]
    fn test_stationary_run_is_empty() {
        let summary = run(&options(PointerPath::Stationary)).unwrap();
        assert_eq!(summary.frames_delivered, 120);
        assert_eq!(summary.frames_executed, 120);
        assert_eq!(summary.spawned, 0);
        assert_eq!(summary.peak_live, 0);
    }

    #[test]
    fn test_circle_run_stays_bounded() {
        let summary = run(&options(PointerPath::Circle)).unwrap();
        assert!(summary.spawned > 0);
        assert!(summary.peak_live <= 100);
    }

    #[test]
    fn test_resize_mid_run() {
        let mut opts = options(PointerPath::Line);
        opts.resize = Some(ResizeAt {
            width: 1600.0,
            height: 1200.0,
            frame: 30,
        });
        let summary = run(&opts).unwrap();
        assert_eq!(summary.surface_pixels, (1600, 1200));
        assert_eq!(summary.frames_executed, 120);
    }

    #[test]
    fn test_invalid_resize_rejected() {
        for (width, height) in [(-5.0, 10.0), (f32::NAN, 1.0), (800.0, f32::INFINITY)] {
            let mut opts = options(PointerPath::Line);
            opts.resize = Some(ResizeAt {
                width,
                height,
                frame: 3,
            });
            assert!(run(&opts).is_err(), "accepted {}x{}", width, height);
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let a = run(&options(PointerPath::Circle)).unwrap();
        let b = run(&options(PointerPath::Circle)).unwrap();
        assert_eq!(a, b);
    }
}
