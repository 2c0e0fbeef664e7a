//! Particle painting

use glint_core::{BlendMode, Color, DrawContext, Gradient};

use crate::config::ParticleConfig;
use crate::particle::{Particle, ParticleSet};

/// Glyph saturation
pub const SATURATION: f32 = 0.7;

/// Glyph lightness
pub const LIGHTNESS: f32 = 0.6;

/// Center color of a particle's glyph
pub fn particle_color(particle: &Particle) -> Color {
    Color::from_hsla(particle.hue, SATURATION, LIGHTNESS, particle.alpha())
}

/// Repaint the whole surface from the particle set
///
/// The surface is cleared first, then every particle is drawn as a soft
/// radial glow with screen blending so overlapping glyphs brighten.
pub fn paint_particles(ctx: &mut dyn DrawContext, particles: &ParticleSet, config: &ParticleConfig) {
    ctx.clear();
    if particles.is_empty() {
        return;
    }

    ctx.push_blend_mode(BlendMode::Screen);
    for particle in particles {
        let color = particle_color(particle);
        let outer = particle.radius * config.glow;
        let glow = Gradient::radial(particle.position, outer, color, color.with_alpha(0.0));
        ctx.fill_circle(particle.position, outer, glow.into());
    }
    ctx.pop_blend_mode();
}
