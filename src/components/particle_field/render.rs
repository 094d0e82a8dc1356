//! Frame rendering for the particle field.
//!
//! Two passes, back to front:
//! 1. Connective lines between every pair of nearby particles
//! 2. The particles themselves as filled circles
//!
//! The pair scan is quadratic in the particle count. The quality controller
//! keeps the count small enough for that to stay cheap.

use super::particles::ParticleField;
use super::surface::DrawSurface;

/// What a single frame put on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	pub connections: usize,
	pub particles: usize,
}

/// Clears the surface and draws the current state of the field.
pub fn render_frame<S: DrawSurface + ?Sized>(field: &ParticleField, surface: &mut S) -> FrameStats {
	surface.clear();

	let (w, h) = surface.size();
	if w <= 0.0 || h <= 0.0 {
		return FrameStats::default();
	}

	FrameStats {
		connections: draw_connections(field, surface),
		particles: draw_particles(field, surface),
	}
}

fn draw_connections<S: DrawSurface + ?Sized>(field: &ParticleField, surface: &mut S) -> usize {
	let style = field.style();
	let max_dist_sq = style.connection_distance * style.connection_distance;
	let particles = field.particles();
	let mut drawn = 0;

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			if dx * dx + dy * dy < max_dist_sq {
				surface.line((a.x, a.y), (b.x, b.y), style.line_color, style.line_width);
				drawn += 1;
			}
		}
	}
	drawn
}

fn draw_particles<S: DrawSurface + ?Sized>(field: &ParticleField, surface: &mut S) -> usize {
	for p in field.particles() {
		surface.circle(p.x, p.y, p.size, p.color.with_alpha(p.opacity));
	}
	field.len()
}
