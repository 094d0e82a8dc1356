//! Falling background particles.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::theme::{Color, FieldStyle};

/// A single falling particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Fall speed in pixels per frame.
	pub speed: f64,
	pub size: f64,
	pub color: Color,
	/// Recomputed every frame from `y`, always in [0, 1].
	pub opacity: f64,
}

/// Anything that holds a particle count the quality logic can adjust.
pub trait ParticleSink {
	fn particle_count(&self) -> usize;
	fn set_particle_count(&mut self, count: usize);
}

/// Fixed-cardinality set of particles over a rectangular surface.
///
/// Particles never die on their own: once one falls past the bottom edge it is
/// reset to a fresh random state above the top edge. The collection only
/// changes size through [`ParticleField::set_particle_count`].
pub struct ParticleField {
	particles: Vec<Particle>,
	style: FieldStyle,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl ParticleField {
	pub fn new(style: FieldStyle, width: f64, height: f64, count: usize, seed: u64) -> Self {
		let mut field = Self {
			particles: Vec::with_capacity(count),
			style,
			width: width.max(0.0),
			height: height.max(0.0),
			rng: SmallRng::seed_from_u64(seed),
		};
		field.set_particle_count(count);
		field
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Grow by appending fresh particles or shrink by dropping the newest ones.
	pub fn set_particle_count(&mut self, count: usize) {
		if count <= self.particles.len() {
			self.particles.truncate(count);
			return;
		}
		let missing = count - self.particles.len();
		self.particles.reserve(missing);
		for _ in 0..missing {
			let particle = self.spawn();
			self.particles.push(particle);
		}
	}

	/// Advance every particle by one frame.
	pub fn advance_frame(&mut self) {
		let floor = self.height + self.style.spawn_margin;
		for i in 0..self.particles.len() {
			let p = &mut self.particles[i];
			p.y += p.speed;
			p.x += (p.y * self.style.sway_frequency).sin() * self.style.sway_amplitude;

			if p.y > floor {
				let fresh = Self::reset_state(&mut self.rng, &self.style, self.width);
				self.particles[i] = fresh;
			}

			let opacity = self.opacity_at(self.particles[i].y);
			self.particles[i].opacity = opacity;
		}
	}

	/// Update the surface bounds. Existing particles keep their positions and
	/// pick up the new bounds when they next wrap.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
	}

	/// Pin particles to known positions.
	#[cfg(test)]
	pub(crate) fn reposition(&mut self, points: &[(f64, f64)]) {
		for (p, &(x, y)) in self.particles.iter_mut().zip(points) {
			p.x = x;
			p.y = y;
		}
	}

	fn opacity_at(&self, y: f64) -> f64 {
		let s = &self.style;
		((y * s.sway_frequency).sin() * s.opacity_swing + s.opacity_base).clamp(0.0, 1.0)
	}

	/// Newly constructed particle, scattered over the full height.
	fn spawn(&mut self) -> Particle {
		let mut p = Self::reset_state(&mut self.rng, &self.style, self.width);
		p.y = self.rng.r#gen::<f64>() * self.height;
		p.opacity = self.rng.gen_range(0.1..0.6);
		p
	}

	/// State a particle takes when it re-enters from above the top edge.
	fn reset_state(rng: &mut SmallRng, style: &FieldStyle, width: f64) -> Particle {
		let (speed_min, speed_max) = style.speed_range();
		let (size_min, size_max) = style.size_range();
		let color_index = if style.palette.is_empty() {
			0
		} else {
			rng.gen_range(0..style.palette.len())
		};

		Particle {
			x: rng.r#gen::<f64>() * width,
			y: -style.spawn_margin,
			speed: sample(rng, speed_min, speed_max),
			size: sample(rng, size_min, size_max),
			color: style.color(color_index),
			opacity: rng.gen_range(0.1..0.6),
		}
	}
}

impl ParticleSink for ParticleField {
	fn particle_count(&self) -> usize {
		self.len()
	}

	fn set_particle_count(&mut self, count: usize) {
		ParticleField::set_particle_count(self, count);
	}
}

/// Uniform sample in `[min, max]`. Degenerate or overflowing ranges yield
/// `min`.
fn sample(rng: &mut SmallRng, min: f64, max: f64) -> f64 {
	if max > min && (max - min).is_finite() {
		rng.gen_range(min..=max)
	} else {
		min
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field(count: usize) -> ParticleField {
		ParticleField::new(FieldStyle::default(), 800.0, 600.0, count, 7)
	}

	#[test]
	fn initial_particles_are_within_ranges() {
		let field = field(100);
		assert_eq!(field.len(), 100);
		for p in field.particles() {
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((1.0..=4.0).contains(&p.size));
			assert!((0.5..=2.5).contains(&p.speed));
			assert!(FieldStyle::default().palette.contains(&p.color));
		}
	}

	#[test]
	fn set_particle_count_grows_and_shrinks_exactly() {
		let mut field = field(30);
		field.set_particle_count(100);
		assert_eq!(field.len(), 100);
		field.set_particle_count(15);
		assert_eq!(field.len(), 15);
		field.set_particle_count(0);
		assert_eq!(field.len(), 0);
		assert!(field.is_empty());
		field.set_particle_count(50);
		assert_eq!(field.len(), 50);
	}

	#[test]
	fn shrinking_keeps_the_oldest_particles() {
		let mut field = field(10);
		let first_three = field.particles()[..3].to_vec();
		field.set_particle_count(3);
		assert_eq!(field.particles(), &first_three[..]);
	}

	#[test]
	fn advance_frame_moves_down_and_keeps_opacity_in_range() {
		let mut field = field(20);
		let before: Vec<f64> = field.particles().iter().map(|p| p.y).collect();
		field.advance_frame();
		for (p, y0) in field.particles().iter().zip(before) {
			assert!(p.y > y0 || p.y < 0.0);
			assert!((0.0..=1.0).contains(&p.opacity));
		}
	}

	#[test]
	fn particles_past_the_bottom_are_reset_above_the_top() {
		let mut field = ParticleField::new(FieldStyle::default(), 200.0, 50.0, 1, 3);
		let mut reset_seen = false;
		let mut last_y = field.particles()[0].y;
		// Slowest particle needs (50 + 10) / 0.5 = 120 frames to cross.
		for _ in 0..200 {
			field.advance_frame();
			let p = &field.particles()[0];
			if p.y < last_y {
				reset_seen = true;
				assert!(p.y <= 0.0);
				assert!((1.0..=4.0).contains(&p.size));
				assert!((0.5..=2.5).contains(&p.speed));
				assert!((0.0..200.0).contains(&p.x));
				break;
			}
			last_y = p.y;
		}
		assert!(reset_seen);
		assert_eq!(field.len(), 1);
	}

	#[test]
	fn resize_does_not_move_particles() {
		let mut field = field(10);
		let before = field.particles().to_vec();
		field.resize(1300.0, 900.0);
		assert_eq!(field.particles(), &before[..]);
		assert_eq!((field.width(), field.height()), (1300.0, 900.0));
	}

	#[test]
	fn negative_bounds_clamp_to_zero() {
		let mut field = field(5);
		field.resize(-10.0, -1.0);
		assert_eq!((field.width(), field.height()), (0.0, 0.0));
	}

	#[test]
	fn same_seed_gives_same_field() {
		assert_eq!(field(12).particles(), field(12).particles());
	}

	#[test]
	fn overflowing_speed_range_uses_the_lower_bound() {
		let style = FieldStyle {
			speed_min: -1e308,
			speed_max: 1e308,
			..FieldStyle::default()
		};
		let field = ParticleField::new(style, 800.0, 600.0, 5, 1);
		assert_eq!(field.len(), 5);
		assert!(field.particles().iter().all(|p| p.speed == -1e308));
	}
}
