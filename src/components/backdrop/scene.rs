//! Everything one animated backdrop owns, stepped one frame at a time.
//!
//! The scene holds no browser state of its own: the caller supplies the time
//! and the surface, so the whole pipeline can be driven headlessly.

use crate::components::particle_field::{DrawSurface, FrameStats, ParticleField, render_frame};
use crate::components::responsive::{
	AdaptiveQualityController, DeviceSignals, EventBus, FrameRateMonitor, ListenerId,
	QualityEvent, SwipeDetector,
};

use super::types::BackdropConfig;

/// Particle field, quality controller and frame-rate monitor wired together
/// over one drawing surface.
pub struct Scene<S> {
	pub field: ParticleField,
	pub surface: S,
	pub controller: AdaptiveQualityController,
	pub monitor: FrameRateMonitor,
	swipes: SwipeDetector,
	events: EventBus,
}

impl<S: DrawSurface> Scene<S> {
	/// The field starts at the controller's initial target.
	pub fn new(surface: S, config: BackdropConfig, signals: DeviceSignals, seed: u64) -> Self {
		let BackdropConfig { field, quality } = config;
		let (width, height) = surface.size();
		let swipes = SwipeDetector::new(quality.swipe_threshold);
		let monitor = FrameRateMonitor::new(quality.monitor.clone());
		let controller = AdaptiveQualityController::new(signals, quality);
		let count = controller.target().particle_count;

		log::info!(
			"portfolio-fx: particle field {}x{} with {} particles",
			width,
			height,
			count
		);

		Self {
			field: ParticleField::new(field, width, height, count, seed),
			surface,
			controller,
			monitor,
			swipes,
			events: EventBus::new(),
		}
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&QualityEvent) + 'static) -> ListenerId {
		self.events.subscribe(listener)
	}

	pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
		self.events.unsubscribe(id)
	}

	/// Run due quality work, then advance and draw one frame.
	pub fn frame(&mut self, now: f64) -> FrameStats {
		self.events.emit(&QualityEvent::FrameTick { now });

		for event in self.controller.poll(now, &mut self.field) {
			self.events.emit(&event);
		}

		self.monitor.record_frame(now);
		if let Some(particle_count) = self.monitor.check(self.controller.breakpoint(), &mut self.field) {
			self.events.emit(&QualityEvent::QualityReduced { particle_count });
		}

		self.field.advance_frame();
		render_frame(&self.field, &mut self.surface)
	}

	/// Resize the drawing surface and the field bounds together.
	pub fn resize_surface(&mut self, width: f64, height: f64) {
		self.surface.resize(width, height);
		self.field.resize(width, height);
	}

	/// Viewport-sized surface: resize now, retarget after the quiet period.
	pub fn viewport_changed(&mut self, now: f64, width: f64, height: f64) {
		self.resize_surface(width, height);
		self.controller.on_viewport_change(now, width, height);
	}

	pub fn orientation_changed(&mut self, now: f64) {
		self.controller.on_orientation_change(now);
	}

	pub fn touch_start(&mut self, x: f64, y: f64) {
		self.swipes.touch_start(x, y);
	}

	pub fn touch_end(&mut self, x: f64, y: f64) {
		if let Some(direction) = self.swipes.touch_end(x, y) {
			self.events.emit(&QualityEvent::Swipe(direction));
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::particle_field::RecordingSurface;
	use crate::components::responsive::{Breakpoint, MonitorConfig, QualityConfig, SwipeDirection};

	fn scene(width: f64, config: BackdropConfig) -> Scene<RecordingSurface> {
		Scene::new(
			RecordingSurface::new(width, 700.0),
			config,
			DeviceSignals {
				viewport_width: width,
				viewport_height: 700.0,
				..DeviceSignals::default()
			},
			11,
		)
	}

	fn recorder(scene: &mut Scene<RecordingSurface>) -> Rc<RefCell<Vec<QualityEvent>>> {
		let log = Rc::new(RefCell::new(Vec::new()));
		let sink = log.clone();
		scene.subscribe(move |e| sink.borrow_mut().push(e.clone()));
		log
	}

	#[test]
	fn frame_draws_every_particle_and_ticks() {
		let mut scene = scene(1300.0, BackdropConfig::default());
		let log = recorder(&mut scene);

		let stats = scene.frame(0.0);
		assert_eq!(stats.particles, 100);
		assert_eq!(scene.surface.circles.len(), scene.field.len());
		assert_eq!(*log.borrow(), vec![QualityEvent::FrameTick { now: 0.0 }]);
	}

	#[test]
	fn growing_viewport_grows_field_and_notifies_once() {
		let mut scene = scene(500.0, BackdropConfig::default());
		let log = recorder(&mut scene);
		assert_eq!(scene.field.len(), 30);

		let mut now = 0.0;
		for w in [700.0, 900.0, 1100.0, 1300.0] {
			scene.viewport_changed(now, w, 800.0);
			scene.frame(now);
			now += 16.0;
		}
		assert_eq!(scene.field.len(), 30);
		assert_eq!(scene.surface.width, 1300.0);

		while scene.controller.has_pending_work() {
			scene.frame(now);
			now += 16.0;
		}

		assert_eq!(scene.field.len(), 100);
		assert_eq!(scene.controller.breakpoint(), Breakpoint::Xl);
		let changes: Vec<_> = log
			.borrow()
			.iter()
			.filter(|e| matches!(e, QualityEvent::BreakpointChanged(_)))
			.cloned()
			.collect();
		assert_eq!(changes, vec![QualityEvent::BreakpointChanged(Breakpoint::Xl)]);
	}

	#[test]
	fn slow_frames_reduce_quality() {
		let mut scene = scene(1300.0, BackdropConfig::default());
		let log = recorder(&mut scene);

		// 20 fps for long enough to fill the minimum sample count.
		for i in 0..=30 {
			scene.frame(i as f64 * 50.0);
		}

		assert_eq!(scene.field.len(), 70);
		assert!(log
			.borrow()
			.contains(&QualityEvent::QualityReduced { particle_count: 70 }));
	}

	#[test]
	fn disabled_monitor_leaves_quality_alone() {
		let config = BackdropConfig {
			quality: QualityConfig {
				monitor: MonitorConfig {
					enabled: false,
					..MonitorConfig::default()
				},
				..QualityConfig::default()
			},
			..BackdropConfig::default()
		};
		let mut scene = scene(1300.0, config);
		for i in 0..100 {
			scene.frame(i as f64 * 100.0);
		}
		assert_eq!(scene.field.len(), 100);
	}

	#[test]
	fn swipes_are_published() {
		let mut scene = scene(400.0, BackdropConfig::default());
		let log = recorder(&mut scene);
		scene.touch_start(200.0, 400.0);
		scene.touch_end(210.0, 100.0);
		assert_eq!(*log.borrow(), vec![QualityEvent::Swipe(SwipeDirection::Up)]);
	}

	#[test]
	fn orientation_change_reapplies_target() {
		let mut scene = scene(900.0, BackdropConfig::default());
		scene.field.set_particle_count(3);
		let log = recorder(&mut scene);

		scene.orientation_changed(0.0);
		scene.frame(50.0);
		assert_eq!(scene.field.len(), 3);
		scene.frame(120.0);
		assert_eq!(scene.field.len(), 50);
		assert!(log.borrow().contains(&QualityEvent::OrientationChanged));
	}

	#[test]
	fn reduce_animation_follows_the_breakpoint_both_ways() {
		let mut scene = scene(500.0, BackdropConfig::default());
		let log = recorder(&mut scene);
		assert!(scene.controller.should_reduce_animations());

		scene.viewport_changed(0.0, 1300.0, 800.0);
		scene.frame(150.0);
		assert!(!scene.controller.should_reduce_animations());

		scene.viewport_changed(200.0, 400.0, 800.0);
		scene.frame(350.0);
		assert!(scene.controller.should_reduce_animations());

		let flags: Vec<bool> = log
			.borrow()
			.iter()
			.filter_map(|e| match e {
				QualityEvent::TargetApplied(target) => Some(target.reduce_animation),
				_ => None,
			})
			.collect();
		assert_eq!(flags, vec![false, true]);
	}
}
