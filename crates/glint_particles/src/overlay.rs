//! The mounted pointer-trail overlay
//!
//! Ties a [`ParticleField`] to a host: owns the frame loop that re-arms
//! itself every frame, the resize subscription and the canvas surface.
//!
//! # Lifecycle
//!
//! ```text
//! mount ──► Scheduled ──frame──► step + paint ──► Scheduled ──► ...
//!                                                     │
//! unmount ─────────────────────────────────────────► Cancelled
//! ```
//!
//! Once cancelled, frames that were already in flight are ignored.

use std::time::Duration;

use glint_animation::{FrameLoop, LoopState};
use glint_core::DrawContext;
use glint_platform::{Event, FrameRequestId, Host, ListenerId, Viewport};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::ParticleConfig;
use crate::field::{FrameOutcome, ParticleField};
use crate::particle::ParticleSet;
use crate::pointer::PointerState;
use crate::render::paint_particles;
use crate::surface::CanvasSurface;

/// A particle overlay mounted into a host
pub struct ParticleOverlay<R = StdRng> {
    field: ParticleField<R>,
    surface: CanvasSurface,
    pointer: PointerState,
    frame_loop: FrameLoop,
    resize_listener: Option<ListenerId>,
}

impl<R: Rng> ParticleOverlay<R> {
    /// Attach to the host
    ///
    /// Returns `None` when the surface is not available yet or the config
    /// does not validate; nothing is registered with the host in that case.
    pub fn mount(
        host: &dyn Host,
        surface: Option<CanvasSurface>,
        config: ParticleConfig,
        pointer: PointerState,
        rng: R,
    ) -> Option<Self> {
        let Some(mut surface) = surface else {
            tracing::debug!("ParticleOverlay: no surface attached, not mounting");
            return None;
        };
        if let Err(err) = config.validate() {
            tracing::warn!("ParticleOverlay: {}, not mounting", err);
            return None;
        }

        surface.resize(host.viewport());
        let field = ParticleField::new(config, rng, pointer.get());
        let resize_listener = Some(host.add_resize_listener());

        let mut frame_loop = FrameLoop::new();
        frame_loop.schedule(host);

        tracing::debug!(
            "ParticleOverlay: mounted (capacity {})",
            field.config().capacity
        );
        Some(Self {
            field,
            surface,
            pointer,
            frame_loop,
            resize_listener,
        })
    }

    /// Route a host event
    ///
    /// Returns the simulation outcome for accepted frames.
    pub fn handle_event(
        &mut self,
        host: &dyn Host,
        event: &Event,
        ctx: &mut dyn DrawContext,
    ) -> Option<FrameOutcome> {
        match event {
            Event::Frame { request, timestamp } => self.on_frame(host, *request, *timestamp, ctx),
            event if event.is_viewport_change() => {
                self.on_resize(host.viewport(), ctx);
                None
            }
            _ => None,
        }
    }

    fn on_frame(
        &mut self,
        host: &dyn Host,
        request: FrameRequestId,
        timestamp: Duration,
        ctx: &mut dyn DrawContext,
    ) -> Option<FrameOutcome> {
        if !self.frame_loop.accept(request) {
            if !self.frame_loop.is_cancelled() {
                tracing::warn!("ParticleOverlay: ignoring stale frame {:?}", request);
            }
            return None;
        }

        let outcome = self.field.step(timestamp, self.pointer.get());
        if outcome.is_executed() {
            paint_particles(ctx, self.field.particles(), self.field.config());
        }

        // Skipped frames still keep the loop alive
        self.frame_loop.schedule(host);
        Some(outcome)
    }

    /// Resize the surface to the viewport
    ///
    /// Particles are left untouched. An unmounted overlay ignores resizes.
    pub fn on_resize(&mut self, viewport: Viewport, ctx: &mut dyn DrawContext) {
        if self.frame_loop.is_cancelled() {
            return;
        }
        if self.surface.resize(viewport) {
            ctx.set_viewport_size(self.surface.logical_size());
        }
    }

    /// Detach from the host
    ///
    /// Cancels the pending frame and removes the resize listener. The overlay
    /// stays cancelled; calling this again is a no-op.
    pub fn unmount(&mut self, host: &dyn Host) {
        let cancelled = self.frame_loop.cancel(host);
        if let Some(listener) = self.resize_listener.take() {
            host.remove_listener(listener);
            tracing::debug!(
                "ParticleOverlay: unmounted (pending frame {:?})",
                cancelled
            );
        }
    }

    pub fn particles(&self) -> &ParticleSet {
        self.field.particles()
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField<R> {
        &mut self.field
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn is_mounted(&self) -> bool {
        !self.frame_loop.is_cancelled()
    }
}
