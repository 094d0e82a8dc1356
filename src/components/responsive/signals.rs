//! Reads device capability signals from the browser.
//!
//! Several of these APIs are non-standard (`navigator.connection`,
//! `navigator.deviceMemory`) and are looked up reflectively. Any probe that is
//! missing or fails contributes `None`/`false` and never panics.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Navigator, Window};

use super::performance::{DeviceSignals, NetworkType};

/// Current viewport size, if a window is available.
pub fn viewport_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

/// High-resolution timestamp in milliseconds, or 0 outside a browser.
pub fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Snapshot every capability signal. Falls back to [`DeviceSignals::default`]
/// when there is no window at all.
pub fn read_device_signals() -> DeviceSignals {
	let Some(window) = web_sys::window() else {
		log::warn!("portfolio-fx: no window, using default device signals");
		return DeviceSignals::default();
	};
	let navigator = window.navigator();
	let fallback = DeviceSignals::default();
	let (viewport_width, viewport_height) =
		viewport_size().unwrap_or((fallback.viewport_width, fallback.viewport_height));

	DeviceSignals {
		viewport_width,
		viewport_height,
		touch: detect_touch(&window, &navigator),
		reduced_motion: detect_reduced_motion(&window),
		network: network_type(&navigator),
		cpu_count: cpu_count(&navigator),
		device_memory_gb: device_memory(&navigator),
	}
}

fn detect_touch(window: &Window, navigator: &Navigator) -> bool {
	let has_ontouchstart = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
	has_ontouchstart || navigator.max_touch_points() > 0
}

fn detect_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|mq| mq.matches())
}

fn network_type(navigator: &Navigator) -> Option<NetworkType> {
	let connection = Reflect::get(navigator, &JsValue::from_str("connection")).ok()?;
	if connection.is_undefined() || connection.is_null() {
		return None;
	}
	let effective = Reflect::get(&connection, &JsValue::from_str("effectiveType")).ok()?;
	effective.as_string().map(|s| NetworkType::parse(&s))
}

fn cpu_count(navigator: &Navigator) -> Option<u32> {
	let n = navigator.hardware_concurrency();
	(n.is_finite() && n >= 1.0).then_some(n as u32)
}

fn device_memory(navigator: &Navigator) -> Option<f64> {
	Reflect::get(navigator, &JsValue::from_str("deviceMemory"))
		.ok()?
		.as_f64()
		.filter(|gb| gb.is_finite() && *gb > 0.0)
}
