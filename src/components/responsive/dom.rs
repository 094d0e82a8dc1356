//! Page-level side effects of quality decisions: body classes, the
//! `data-breakpoint` attribute, the `--vh` CSS variable and DOM events that
//! stylesheet rules and other scripts key off.
//!
//! Every function here is best effort. A missing body or a rejected call is
//! logged at debug level and otherwise ignored.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, HtmlElement};

use super::breakpoint::Breakpoint;
use super::gestures::SwipeDirection;
use super::performance::{DeviceSignals, PerformanceClass};

fn body() -> Option<HtmlElement> {
	web_sys::window()?.document()?.body()
}

fn add_body_class(class: &str) {
	if let Some(body) = body() {
		if let Err(e) = body.class_list().add_1(class) {
			log::debug!("portfolio-fx: could not add class {class}: {e:?}");
		}
	}
}

/// Tag `<body>` with device classes and the initial breakpoint.
pub fn apply_device_classes(
	signals: &DeviceSignals,
	breakpoint: Breakpoint,
	performance: PerformanceClass,
	reduce_animation: bool,
) {
	add_body_class(if signals.touch { "touch-device" } else { "no-touch" });
	add_body_class(if signals.reduced_motion { "reduced-motion" } else { "motion-ok" });
	add_body_class(match performance {
		PerformanceClass::Low => "low-performance",
		PerformanceClass::Normal => "high-performance",
	});
	set_reduced_animations(reduce_animation);
	set_breakpoint_attribute(breakpoint);
	set_viewport_height_var(signals.viewport_height);
}

pub fn set_breakpoint_attribute(breakpoint: Breakpoint) {
	if let Some(body) = body() {
		let _ = body.set_attribute("data-breakpoint", breakpoint.name());
	}
}

/// Expose 1% of the real viewport height as `--vh` for mobile layouts.
pub fn set_viewport_height_var(height: f64) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	else {
		return;
	};
	let _ = root
		.style()
		.set_property("--vh", &format!("{}px", height * 0.01));
}

/// Add or remove the `reduced-animations` body class.
pub fn set_reduced_animations(reduce: bool) {
	if let Some(body) = body() {
		if let Err(e) = body
			.class_list()
			.toggle_with_force("reduced-animations", reduce)
		{
			log::debug!("portfolio-fx: could not toggle reduced-animations: {e:?}");
		}
	}
}

/// Marks the page once the frame-rate monitor has cut quality.
pub fn enter_performance_mode() {
	add_body_class("performance-mode");
}

/// Dispatch `breakpointChange` on `window` with `{ breakpoint }` as detail.
pub fn dispatch_breakpoint_change(breakpoint: Breakpoint) {
	let detail: JsValue = Object::new().into();
	let _ = Reflect::set(
		&detail,
		&JsValue::from_str("breakpoint"),
		&JsValue::from_str(breakpoint.name()),
	);
	dispatch("breakpointChange", Some(&detail));
}

/// Dispatch `swipeUp` / `swipeDown` / `swipeLeft` / `swipeRight` on `window`.
pub fn dispatch_swipe(direction: SwipeDirection) {
	dispatch(direction.event_name(), None);
}

fn dispatch(name: &str, detail: Option<&JsValue>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let init = CustomEventInit::new();
	if let Some(detail) = detail {
		init.set_detail(detail);
	}
	match CustomEvent::new_with_event_init_dict(name, &init) {
		Ok(event) => {
			let _ = window.dispatch_event(&event);
		}
		Err(e) => log::debug!("portfolio-fx: could not create {name} event: {e:?}"),
	}
}
