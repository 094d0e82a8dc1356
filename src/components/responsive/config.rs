//! Timing and threshold settings for quality adaptation.

use serde::Deserialize;

/// Frame-rate monitor settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
	/// Whether frame timing is sampled at all.
	pub enabled: bool,
	/// Rolling window capacity in samples.
	pub window: usize,
	/// Samples required before the monitor may act.
	pub min_samples: usize,
	/// Average FPS below which mobile tiers are scaled down.
	pub mobile_fps_threshold: f64,
	/// Average FPS below which all other tiers are scaled down.
	pub desktop_fps_threshold: f64,
	/// Fraction of particles kept after a scale-down.
	pub scale_factor: f64,
	/// Scale-down never goes below this count.
	pub min_particles: usize,
}

impl Default for MonitorConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			window: 60,
			min_samples: 30,
			mobile_fps_threshold: 30.0,
			desktop_fps_threshold: 45.0,
			scale_factor: 0.7,
			min_particles: 10,
		}
	}
}

/// Quality controller settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
	/// Resize bursts are coalesced until this long after the last event.
	pub quiet_period_ms: f64,
	/// Delay after an orientation change before re-reading the viewport.
	pub orientation_settle_ms: f64,
	/// Upper bound on every particle target.
	pub max_particles: usize,
	/// Minimum travel in pixels for a touch to count as a swipe.
	pub swipe_threshold: f64,
	pub monitor: MonitorConfig,
}

impl Default for QualityConfig {
	fn default() -> Self {
		Self {
			quiet_period_ms: 150.0,
			orientation_settle_ms: 100.0,
			max_particles: 150,
			swipe_threshold: 50.0,
			monitor: MonitorConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nested_partial_config_keeps_defaults() {
		let config: QualityConfig =
			serde_json::from_str(r#"{"max_particles": 80, "monitor": {"enabled": false}}"#).unwrap();
		assert_eq!(config.max_particles, 80);
		assert_eq!(config.quiet_period_ms, 150.0);
		assert!(!config.monitor.enabled);
		assert_eq!(config.monitor.window, 60);
	}
}
