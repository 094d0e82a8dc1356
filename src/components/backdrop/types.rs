//! Page-supplied configuration for the backdrop.

use serde::Deserialize;

use crate::components::particle_field::FieldStyle;
use crate::components::responsive::QualityConfig;

/// Complete backdrop configuration. Every key is optional.
///
/// ```json
/// { "field": { "connection_distance": 120 }, "quality": { "max_particles": 80 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
	pub field: FieldStyle,
	pub quality: QualityConfig,
}
