//! Notifications emitted by the backdrop and a synchronous dispatcher for them.

use super::breakpoint::Breakpoint;
use super::gestures::SwipeDirection;
use super::performance::QualityTarget;

/// Something other decorative components may want to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum QualityEvent {
	/// The viewport crossed into a different width tier.
	BreakpointChanged(Breakpoint),
	/// The device orientation settled after a change.
	OrientationChanged,
	/// A resize or orientation recomputation pushed a fresh target.
	TargetApplied(QualityTarget),
	/// A frame is about to be drawn. `now` is in milliseconds.
	FrameTick { now: f64 },
	/// The frame-rate monitor cut the particle count.
	QualityReduced { particle_count: usize },
	Swipe(SwipeDirection),
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(&QualityEvent)>;

/// Single-threaded listener registry. Events are delivered immediately, in
/// subscription order.
#[derive(Default)]
pub struct EventBus {
	listeners: Vec<(ListenerId, Listener)>,
	next_id: usize,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&QualityEvent) + 'static) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	/// Returns whether a listener was removed.
	pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(lid, _)| *lid != id);
		self.listeners.len() != before
	}

	pub fn emit(&mut self, event: &QualityEvent) {
		for (_, listener) in &mut self.listeners {
			listener(event);
		}
	}

	pub fn len(&self) -> usize {
		self.listeners.len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty()
	}
}
