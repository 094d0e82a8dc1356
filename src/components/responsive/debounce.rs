//! Time-injected debouncing.
//!
//! Callers pass the current time in milliseconds, so the same code runs
//! against `performance.now()` in the browser and a fake clock in tests.

/// Holds the latest value of a burst until the burst has been quiet for
/// `quiet_ms`.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
	quiet_ms: f64,
	pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
	pub fn new(quiet_ms: f64) -> Self {
		Self {
			quiet_ms: quiet_ms.max(0.0),
			pending: None,
		}
	}

	/// Replace any pending value and restart the quiet period.
	pub fn push(&mut self, now: f64, value: T) {
		self.pending = Some((now + self.quiet_ms, value));
	}

	/// Take the pending value if its quiet period has elapsed.
	pub fn poll(&mut self, now: f64) -> Option<T> {
		match self.pending {
			Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, v)| v),
			_ => None,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	pub fn cancel(&mut self) {
		self.pending = None;
	}
}
