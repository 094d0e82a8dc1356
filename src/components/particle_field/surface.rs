//! Drawing surfaces the particle field renders onto.
//!
//! The renderer only talks to [`DrawSurface`], so the browser canvas and the
//! headless recorder used in tests are interchangeable.

use std::f64::consts::PI;
use std::fmt;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// A 2D surface with a known logical size.
pub trait DrawSurface {
	/// Logical `(width, height)` in pixels.
	fn size(&self) -> (f64, f64);
	fn resize(&mut self, width: f64, height: f64);
	fn clear(&mut self);
	/// Stroke a straight segment.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Fill a circle; `color.a` is used as the fill opacity.
	fn circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// Reasons a canvas surface could not be created.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
	/// Not running inside a browser window.
	NoWindow,
	/// No element with the given id, or the element is not a canvas.
	MissingCanvas(String),
	/// The canvas refused to hand out a 2D context.
	NoContext,
}

impl fmt::Display for SurfaceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SurfaceError::NoWindow => write!(f, "no browser window available"),
			SurfaceError::MissingCanvas(id) => write!(f, "canvas with id '{id}' not found"),
			SurfaceError::NoContext => write!(f, "canvas has no 2d rendering context"),
		}
	}
}

impl std::error::Error for SurfaceError {}

/// Look up a `<canvas>` element by id.
pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement, SurfaceError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(SurfaceError::NoWindow)?;
	document
		.get_element_by_id(id)
		.and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
		.ok_or_else(|| SurfaceError::MissingCanvas(id.to_string()))
}

/// An HTML canvas with its 2D rendering context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(SurfaceError::NoContext)?;
		Ok(Self { canvas, ctx })
	}

	/// Look up a canvas element by id.
	pub fn find(id: &str) -> Result<Self, SurfaceError> {
		Self::new(find_canvas(id)?)
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}
}

impl DrawSurface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_global_alpha(color.a);
		self.ctx.set_fill_style_str(&color.to_css_rgb());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
		self.ctx.set_global_alpha(1.0);
	}
}

/// Surface that records draw calls instead of painting them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub clears: usize,
	pub lines: Vec<((f64, f64), (f64, f64))>,
	pub circles: Vec<(f64, f64, f64, Color)>,
}

#[cfg(test)]
impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn clear(&mut self) {
		self.clears += 1;
		self.lines.clear();
		self.circles.clear();
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), _color: Color, _width: f64) {
		self.lines.push((from, to));
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.circles.push((x, y, radius, color));
	}
}
