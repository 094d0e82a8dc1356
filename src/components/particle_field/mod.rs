//! Animated particle background.
//!
//! Renders a field of slowly falling, softly swaying particles with faint
//! lines joining close neighbours:
//! - Fixed-size particle set; particles wrap from bottom to top instead of dying
//! - Per-frame opacity oscillation driven by vertical position
//! - Quadratic nearest-neighbour line pass, kept cheap by small counts
//! - Rendering against an abstract [`DrawSurface`] so frames can be stepped headlessly
//!
//! # Example
//!
//! ```ignore
//! use portfolio_fx::components::particle_field::{
//!     render_frame, CanvasSurface, FieldStyle, ParticleField,
//! };
//!
//! let mut surface = CanvasSurface::find("particles-canvas")?;
//! let mut field = ParticleField::new(FieldStyle::default(), 1280.0, 720.0, 100, 42);
//! field.advance_frame();
//! render_frame(&field, &mut surface);
//! ```

mod particles;
mod render;
mod surface;
pub mod theme;

pub use particles::{Particle, ParticleField, ParticleSink};
pub use render::{FrameStats, render_frame};
#[cfg(test)]
pub(crate) use surface::RecordingSurface;
pub use surface::{CanvasSurface, DrawSurface, SurfaceError, find_canvas};
pub use theme::{Color, FieldStyle};
