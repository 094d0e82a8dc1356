//! Swipe detection from touch start/end points.

/// Direction of a completed swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
	Up,
	Down,
	Left,
	Right,
}

impl SwipeDirection {
	/// Name of the matching DOM event (`swipeUp`, ...).
	pub const fn event_name(self) -> &'static str {
		match self {
			SwipeDirection::Up => "swipeUp",
			SwipeDirection::Down => "swipeDown",
			SwipeDirection::Left => "swipeLeft",
			SwipeDirection::Right => "swipeRight",
		}
	}
}

#[derive(Clone, Debug)]
pub struct SwipeDetector {
	threshold: f64,
	start: Option<(f64, f64)>,
}

impl SwipeDetector {
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold: threshold.max(0.0),
			start: None,
		}
	}

	pub fn touch_start(&mut self, x: f64, y: f64) {
		self.start = Some((x, y));
	}

	/// Classify the gesture; the dominant axis must travel past the threshold.
	pub fn touch_end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
		let (sx, sy) = self.start.take()?;
		let (dx, dy) = (x - sx, y - sy);

		if dy.abs() > dx.abs() && dy.abs() > self.threshold {
			Some(if dy > 0.0 { SwipeDirection::Down } else { SwipeDirection::Up })
		} else if dx.abs() > dy.abs() && dx.abs() > self.threshold {
			Some(if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left })
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn swipe(from: (f64, f64), to: (f64, f64)) -> Option<SwipeDirection> {
		let mut d = SwipeDetector::new(50.0);
		d.touch_start(from.0, from.1);
		d.touch_end(to.0, to.1)
	}

	#[test]
	fn dominant_axis_wins() {
		assert_eq!(swipe((100.0, 100.0), (110.0, 200.0)), Some(SwipeDirection::Down));
		assert_eq!(swipe((100.0, 300.0), (90.0, 100.0)), Some(SwipeDirection::Up));
		assert_eq!(swipe((100.0, 100.0), (220.0, 130.0)), Some(SwipeDirection::Right));
		assert_eq!(swipe((300.0, 100.0), (100.0, 80.0)), Some(SwipeDirection::Left));
	}

	#[test]
	fn short_or_diagonal_moves_are_ignored() {
		assert_eq!(swipe((0.0, 0.0), (0.0, 50.0)), None);
		assert_eq!(swipe((0.0, 0.0), (80.0, 80.0)), None);
	}

	#[test]
	fn end_without_start_is_ignored() {
		let mut d = SwipeDetector::new(50.0);
		assert_eq!(d.touch_end(500.0, 0.0), None);
	}
}
