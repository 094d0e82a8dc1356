//! Keeps the particle target in step with the viewport and device.
//!
//! Created once at startup from a [`DeviceSignals`] snapshot. Resize and
//! orientation events only schedule work; [`AdaptiveQualityController::poll`]
//! performs it once the quiet period or settle delay has elapsed, and hands
//! the resulting notifications back to the caller for dispatch.

use super::breakpoint::Breakpoint;
use super::config::QualityConfig;
use super::debounce::Debouncer;
use super::events::QualityEvent;
use super::performance::{DeviceSignals, PerformanceClass, QualityTarget, classify_performance};
use crate::components::particle_field::ParticleSink;

pub struct AdaptiveQualityController {
	config: QualityConfig,
	signals: DeviceSignals,
	breakpoint: Breakpoint,
	performance: PerformanceClass,
	resize: Debouncer<(f64, f64)>,
	orientation: Debouncer<()>,
}

impl AdaptiveQualityController {
	pub fn new(signals: DeviceSignals, config: QualityConfig) -> Self {
		let breakpoint = Breakpoint::classify(signals.viewport_width);
		let performance = classify_performance(&signals);
		log::info!(
			"portfolio-fx: quality controller ready (breakpoint {}, touch {}, reduced motion {}, performance {})",
			breakpoint,
			signals.touch,
			signals.reduced_motion,
			performance.name()
		);

		Self {
			resize: Debouncer::new(config.quiet_period_ms),
			orientation: Debouncer::new(config.orientation_settle_ms),
			config,
			signals,
			breakpoint,
			performance,
		}
	}

	pub fn breakpoint(&self) -> Breakpoint {
		self.breakpoint
	}

	pub fn performance(&self) -> PerformanceClass {
		self.performance
	}

	pub fn signals(&self) -> &DeviceSignals {
		&self.signals
	}

	pub fn config(&self) -> &QualityConfig {
		&self.config
	}

	pub fn target(&self) -> QualityTarget {
		QualityTarget::compute(
			self.breakpoint,
			self.performance,
			&self.signals,
			self.config.max_particles,
		)
	}

	pub fn should_reduce_animations(&self) -> bool {
		self.target().reduce_animation
	}

	/// Replace the capability snapshot (e.g. after a connection change) and
	/// re-derive tier and performance class from it.
	pub fn update_signals(&mut self, signals: DeviceSignals) {
		self.breakpoint = Breakpoint::classify(signals.viewport_width);
		self.performance = classify_performance(&signals);
		self.signals = signals;
	}

	/// Note a resize; the recomputation waits for the quiet period.
	pub fn on_viewport_change(&mut self, now: f64, width: f64, height: f64) {
		self.resize.push(now, (width, height));
	}

	/// Note an orientation change; the recomputation waits for the settle delay.
	pub fn on_orientation_change(&mut self, now: f64) {
		self.orientation.push(now, ());
	}

	pub fn has_pending_work(&self) -> bool {
		self.resize.is_pending() || self.orientation.is_pending()
	}

	/// Run whatever recomputation is due and push the new target into `sink`.
	pub fn poll(&mut self, now: f64, sink: &mut impl ParticleSink) -> Vec<QualityEvent> {
		let mut events = Vec::new();
		let mut retarget = false;

		if let Some((width, height)) = self.resize.poll(now) {
			self.signals.viewport_width = width;
			self.signals.viewport_height = height;
			let breakpoint = Breakpoint::classify(width);
			if breakpoint != self.breakpoint {
				log::info!(
					"portfolio-fx: breakpoint changed {} -> {}",
					self.breakpoint,
					breakpoint
				);
				self.breakpoint = breakpoint;
				events.push(QualityEvent::BreakpointChanged(breakpoint));
			}
			retarget = true;
		}

		if self.orientation.poll(now).is_some() {
			log::debug!("portfolio-fx: orientation settled");
			events.push(QualityEvent::OrientationChanged);
			retarget = true;
		}

		if retarget {
			self.apply_target(sink);
			events.push(QualityEvent::TargetApplied(self.target()));
		}
		events
	}

	/// Push the current target count into `sink`.
	pub fn apply_target(&self, sink: &mut impl ParticleSink) {
		let target = self.target();
		if sink.particle_count() != target.particle_count {
			log::debug!(
				"portfolio-fx: particle target {} -> {}",
				sink.particle_count(),
				target.particle_count
			);
		}
		sink.set_particle_count(target.particle_count);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::responsive::performance::NetworkType;

	#[derive(Default)]
	struct Recorder {
		count: usize,
		calls: Vec<usize>,
	}

	impl ParticleSink for Recorder {
		fn particle_count(&self) -> usize {
			self.count
		}

		fn set_particle_count(&mut self, count: usize) {
			self.count = count;
			self.calls.push(count);
		}
	}

	fn controller(width: f64) -> AdaptiveQualityController {
		AdaptiveQualityController::new(
			DeviceSignals {
				viewport_width: width,
				viewport_height: 800.0,
				..DeviceSignals::default()
			},
			QualityConfig::default(),
		)
	}

	#[test]
	fn initial_classification() {
		let c = controller(500.0);
		assert_eq!(c.breakpoint(), Breakpoint::Sm);
		assert_eq!(c.performance(), PerformanceClass::Normal);
		assert_eq!(c.target().particle_count, 30);
		assert!(c.should_reduce_animations());
	}

	#[test]
	fn burst_of_resizes_recomputes_once_with_final_size() {
		let mut c = controller(1300.0);
		let mut sink = Recorder::default();
		let widths = [400.0, 500.0, 600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0, 900.0];
		for (i, w) in widths.into_iter().enumerate() {
			let now = i as f64 * 10.0;
			c.on_viewport_change(now, w, 600.0);
			c.poll(now, &mut sink);
		}
		assert!(sink.calls.is_empty());

		let events = c.poll(90.0 + 150.0, &mut sink);
		assert_eq!(sink.calls, vec![50]);
		assert_eq!(c.signals().viewport_width, 900.0);
		assert_eq!(
			events,
			vec![
				QualityEvent::BreakpointChanged(Breakpoint::Md),
				QualityEvent::TargetApplied(QualityTarget {
					particle_count: 50,
					reduce_animation: false,
				}),
			]
		);

		assert!(c.poll(10_000.0, &mut sink).is_empty());
		assert_eq!(sink.calls.len(), 1);
	}

	#[test]
	fn small_to_large_viewport_transition() {
		let mut c = controller(500.0);
		let mut sink = Recorder::default();
		c.apply_target(&mut sink);
		assert_eq!(sink.count, 30);

		c.on_viewport_change(1000.0, 1300.0, 800.0);
		let events = c.poll(1150.0, &mut sink);

		assert_eq!(c.breakpoint(), Breakpoint::Xl);
		assert!(c.breakpoint().is_desktop());
		assert_eq!(sink.count, 100);
		let changes = events
			.iter()
			.filter(|e| matches!(e, QualityEvent::BreakpointChanged(_)))
			.count();
		assert_eq!(changes, 1);
		assert!(events.contains(&QualityEvent::TargetApplied(QualityTarget {
			particle_count: 100,
			reduce_animation: false,
		})));
	}

	#[test]
	fn resize_within_tier_retargets_without_notification() {
		let mut c = controller(1100.0);
		let mut sink = Recorder { count: 7, calls: Vec::new() };
		c.on_viewport_change(0.0, 1200.0, 700.0);
		let events = c.poll(150.0, &mut sink);
		assert_eq!(events, vec![QualityEvent::TargetApplied(c.target())]);
		assert_eq!(sink.calls, vec![100]);
	}

	#[test]
	fn orientation_change_waits_for_settle_delay() {
		let mut c = controller(800.0);
		let mut sink = Recorder::default();
		c.on_orientation_change(0.0);
		assert!(c.has_pending_work());
		assert!(c.poll(99.0, &mut sink).is_empty());
		assert_eq!(
			c.poll(100.0, &mut sink),
			vec![QualityEvent::OrientationChanged, QualityEvent::TargetApplied(c.target())]
		);
		assert_eq!(sink.calls, vec![50]);
		assert!(!c.has_pending_work());
	}

	#[test]
	fn low_performance_overrides_tier() {
		let c = AdaptiveQualityController::new(
			DeviceSignals {
				viewport_width: 1920.0,
				network: Some(NetworkType::Slow2g),
				..DeviceSignals::default()
			},
			QualityConfig::default(),
		);
		assert_eq!(c.breakpoint(), Breakpoint::Xxl);
		assert_eq!(c.target().particle_count, 15);
		assert!(c.should_reduce_animations());
	}

	#[test]
	fn update_signals_reclassifies() {
		let mut c = controller(1300.0);
		c.update_signals(DeviceSignals {
			viewport_width: 320.0,
			cpu_count: Some(2),
			device_memory_gb: Some(2.0),
			..DeviceSignals::default()
		});
		assert_eq!(c.breakpoint(), Breakpoint::Xs);
		assert_eq!(c.performance(), PerformanceClass::Low);
	}
}
