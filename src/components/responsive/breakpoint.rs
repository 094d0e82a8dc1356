//! Viewport width tiers.

use std::fmt;

/// Named viewport-width bucket, ordered from narrowest to widest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
	Xs,
	Sm,
	Md,
	Lg,
	Xl,
	Xxl,
}

impl Breakpoint {
	/// Every tier in ascending order.
	pub const ALL: [Breakpoint; 6] = [
		Breakpoint::Xs,
		Breakpoint::Sm,
		Breakpoint::Md,
		Breakpoint::Lg,
		Breakpoint::Xl,
		Breakpoint::Xxl,
	];

	/// Minimum viewport width (inclusive) for this tier.
	pub const fn min_width(self) -> f64 {
		match self {
			Breakpoint::Xs => 320.0,
			Breakpoint::Sm => 480.0,
			Breakpoint::Md => 768.0,
			Breakpoint::Lg => 1024.0,
			Breakpoint::Xl => 1280.0,
			Breakpoint::Xxl => 1536.0,
		}
	}

	/// Largest tier whose threshold the width reaches. Anything narrower than
	/// the smallest threshold (including NaN) is `Xs`.
	pub fn classify(width: f64) -> Self {
		Self::ALL
			.iter()
			.rev()
			.copied()
			.find(|bp| width >= bp.min_width())
			.unwrap_or(Breakpoint::Xs)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Breakpoint::Xs => "xs",
			Breakpoint::Sm => "sm",
			Breakpoint::Md => "md",
			Breakpoint::Lg => "lg",
			Breakpoint::Xl => "xl",
			Breakpoint::Xxl => "xxl",
		}
	}

	pub fn is_mobile(self) -> bool {
		matches!(self, Breakpoint::Xs | Breakpoint::Sm)
	}

	pub fn is_tablet(self) -> bool {
		self == Breakpoint::Md
	}

	pub fn is_desktop(self) -> bool {
		self >= Breakpoint::Lg
	}
}

impl fmt::Display for Breakpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
