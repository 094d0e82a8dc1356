//! portfolio-fx: Animated particle backdrop with adaptive quality for a
//! portfolio site.
//!
//! This crate provides a WASM canvas background that scales its particle count
//! to the viewport breakpoint, the device's capabilities and the measured frame
//! rate, and tags the page with device classes for responsive styling.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::backdrop::{Backdrop, BackdropConfig, ParticleBackdrop, mount_backdrop};
use components::particle_field::FieldStyle;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

/// Load backdrop configuration from a script element with id="particle-config".
/// A missing element gives the defaults.
pub fn load_config() -> BackdropConfig {
	read_config_text().map_or_else(BackdropConfig::default, |text| config_from_json(&text))
}

fn read_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

fn config_from_json(text: &str) -> BackdropConfig {
	match serde_json::from_str::<BackdropConfig>(text) {
		Ok(mut config) => {
			if let Err(reason) = config.field.validate() {
				warn!("portfolio-fx: invalid particle style ({}), using defaults", reason);
				config.field = FieldStyle::default();
			}
			info!(
				"portfolio-fx: loaded config (max {} particles)",
				config.quality.max_particles
			);
			config
		}
		Err(e) => {
			warn!("portfolio-fx: failed to parse particle config: {}", e);
			BackdropConfig::default()
		}
	}
}

/// Main application component.
/// Reads the page configuration and renders the fullscreen particle backdrop.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackdrop config=config fullscreen=true />
	}
}
