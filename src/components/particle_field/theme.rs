//! Colors and tuning constants for the particle field.
//!
//! The defaults reproduce the hero background of the portfolio: indigo, cyan,
//! amber and violet motes drifting downwards, joined by faint indigo lines.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parses `#RRGGBB` or `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return None;
			}
			let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
			let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
			let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
			return Some(Color::rgb(r, g, b));
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		if nums.len() < 3 || nums.len() > 4 {
			return None;
		}
		let r = nums[0].parse().ok()?;
		let g = nums[1].parse().ok()?;
		let b = nums[2].parse().ok()?;
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl TryFrom<String> for Color {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Color::parse(&value).ok_or_else(|| format!("invalid color: {value:?}"))
	}
}

/// Default particle palette (indigo, cyan, amber, violet).
pub fn default_palette() -> Vec<Color> {
	vec![
		Color::rgb(0x63, 0x66, 0xf1),
		Color::rgb(0x06, 0xb6, 0xd4),
		Color::rgb(0xf5, 0x9e, 0x0b),
		Color::rgb(0x8b, 0x5c, 0xf6),
	]
}

/// Particle field tuning.
///
/// Connection distance and sway constants are tuned by eye; they are exposed
/// here so a page can adjust them through the JSON config.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
	/// Colors a particle may take. An empty palette falls back to white.
	pub palette: Vec<Color>,
	/// Minimum particle radius
	pub size_min: f64,
	/// Maximum particle radius
	pub size_max: f64,
	/// Minimum fall speed (pixels per frame)
	pub speed_min: f64,
	/// Maximum fall speed (pixels per frame)
	pub speed_max: f64,
	/// Particles respawn this far above the top edge and wrap this far below the bottom.
	pub spawn_margin: f64,
	/// Horizontal sway per frame at the crest of the sine.
	pub sway_amplitude: f64,
	/// Spatial frequency of both sway and opacity oscillation.
	pub sway_frequency: f64,
	/// Opacity midpoint
	pub opacity_base: f64,
	/// Opacity oscillation amplitude
	pub opacity_swing: f64,
	/// Particles closer than this are joined by a line.
	pub connection_distance: f64,
	/// Connective line stroke
	pub line_color: Color,
	/// Connective line width
	pub line_width: f64,
}

impl FieldStyle {
	/// Pick a palette color by index, wrapping around.
	pub fn color(&self, index: usize) -> Color {
		if self.palette.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.palette[index % self.palette.len()]
	}

	/// Size range with the bounds in ascending order.
	pub fn size_range(&self) -> (f64, f64) {
		ordered(self.size_min, self.size_max)
	}

	/// Speed range with the bounds in ascending order.
	pub fn speed_range(&self) -> (f64, f64) {
		ordered(self.speed_min, self.speed_max)
	}

	/// Reject tunings the particle system cannot animate: non-finite numbers,
	/// negative sizes or distances, and ranges whose width overflows.
	pub fn validate(&self) -> Result<(), String> {
		let fields = [
			("size_min", self.size_min),
			("size_max", self.size_max),
			("speed_min", self.speed_min),
			("speed_max", self.speed_max),
			("spawn_margin", self.spawn_margin),
			("sway_amplitude", self.sway_amplitude),
			("sway_frequency", self.sway_frequency),
			("opacity_base", self.opacity_base),
			("opacity_swing", self.opacity_swing),
			("connection_distance", self.connection_distance),
			("line_width", self.line_width),
		];
		if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
			return Err(format!("{name} must be a finite number"));
		}

		for (name, value) in [
			("size_min", self.size_min),
			("size_max", self.size_max),
			("spawn_margin", self.spawn_margin),
			("connection_distance", self.connection_distance),
			("line_width", self.line_width),
		] {
			if value < 0.0 {
				return Err(format!("{name} must not be negative"));
			}
		}

		for (name, (min, max)) in [("size", self.size_range()), ("speed", self.speed_range())] {
			if !(max - min).is_finite() {
				return Err(format!("{name} range is too wide"));
			}
		}
		Ok(())
	}
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self {
			palette: default_palette(),
			size_min: 1.0,
			size_max: 4.0,
			speed_min: 0.5,
			speed_max: 2.5,
			spawn_margin: 10.0,
			sway_amplitude: 0.5,
			sway_frequency: 0.01,
			opacity_base: 0.3,
			opacity_swing: 0.5,
			connection_distance: 100.0,
			line_color: Color::rgba(99, 102, 241, 0.1),
			line_width: 1.0,
		}
	}
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
	if a <= b { (a, b) } else { (b, a) }
}
