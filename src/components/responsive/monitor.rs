//! Rolling frame-rate measurement with one-shot quality back-off.

use std::collections::VecDeque;

use super::breakpoint::Breakpoint;
use super::config::MonitorConfig;
use crate::components::particle_field::ParticleSink;

/// Coarse frame-rate grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceGrade {
	Excellent,
	Good,
	Fair,
	Poor,
}

impl PerformanceGrade {
	pub fn from_fps(fps: f64) -> Self {
		if fps >= 55.0 {
			PerformanceGrade::Excellent
		} else if fps >= 45.0 {
			PerformanceGrade::Good
		} else if fps >= 30.0 {
			PerformanceGrade::Fair
		} else {
			PerformanceGrade::Poor
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			PerformanceGrade::Excellent => "excellent",
			PerformanceGrade::Good => "good",
			PerformanceGrade::Fair => "fair",
			PerformanceGrade::Poor => "poor",
		}
	}
}

/// Point-in-time frame statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMetrics {
	/// Instantaneous FPS of the last frame.
	pub fps: f64,
	pub frame_time_ms: f64,
	pub average_fps: f64,
	pub grade: PerformanceGrade,
}

/// Tracks inter-frame durations over a fixed window of samples.
pub struct FrameRateMonitor {
	config: MonitorConfig,
	samples: VecDeque<f64>,
	last_frame: Option<f64>,
	last_fps: f64,
	last_frame_time: f64,
	monitoring: bool,
}

impl FrameRateMonitor {
	pub fn new(config: MonitorConfig) -> Self {
		let window = config.window.max(1);
		Self {
			monitoring: config.enabled,
			config,
			samples: VecDeque::with_capacity(window),
			last_frame: None,
			last_fps: 0.0,
			last_frame_time: 0.0,
		}
	}

	pub fn start(&mut self) {
		self.monitoring = true;
	}

	/// Stop sampling. The next frame after a restart is treated as the first.
	pub fn stop(&mut self) {
		self.monitoring = false;
		self.last_frame = None;
	}

	pub fn is_monitoring(&self) -> bool {
		self.monitoring
	}

	/// Record a frame timestamp in milliseconds.
	pub fn record_frame(&mut self, now: f64) {
		if !self.monitoring {
			return;
		}
		let Some(previous) = self.last_frame.replace(now) else {
			return;
		};
		let delta = now - previous;
		if delta <= 0.0 || !delta.is_finite() {
			return;
		}

		self.last_frame_time = delta;
		self.last_fps = 1000.0 / delta;
		if self.samples.len() >= self.config.window.max(1) {
			self.samples.pop_front();
		}
		self.samples.push_back(self.last_fps);
	}

	pub fn sample_count(&self) -> usize {
		self.samples.len()
	}

	/// Mean of the window, or 60 before any sample exists.
	pub fn average_fps(&self) -> f64 {
		if self.samples.is_empty() {
			return 60.0;
		}
		self.samples.iter().sum::<f64>() / self.samples.len() as f64
	}

	pub fn grade(&self) -> PerformanceGrade {
		PerformanceGrade::from_fps(self.average_fps())
	}

	pub fn metrics(&self) -> FrameMetrics {
		FrameMetrics {
			fps: self.last_fps,
			frame_time_ms: self.last_frame_time,
			average_fps: self.average_fps(),
			grade: self.grade(),
		}
	}

	fn threshold(&self, tier: Breakpoint) -> f64 {
		if tier.is_mobile() {
			self.config.mobile_fps_threshold
		} else {
			self.config.desktop_fps_threshold
		}
	}

	/// Scale the sink down if the window is full enough and running slow.
	/// Returns the new particle count when it acted.
	pub fn check(&mut self, tier: Breakpoint, sink: &mut impl ParticleSink) -> Option<usize> {
		if self.samples.len() < self.config.min_samples {
			return None;
		}
		let average = self.average_fps();
		if average >= self.threshold(tier) {
			return None;
		}

		let current = sink.particle_count();
		let scaled = (current as f64 * self.config.scale_factor).floor() as usize;
		let count = scaled.max(self.config.min_particles).min(current);
		log::warn!(
			"portfolio-fx: average {:.1} fps on {}, reducing particles {} -> {}",
			average,
			tier,
			current,
			count
		);
		sink.set_particle_count(count);
		self.samples.clear();
		Some(count)
	}
}
