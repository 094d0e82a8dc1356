//! Browser wiring for the backdrop.
//!
//! [`Backdrop::attach`] binds a [`Scene`] to a real canvas: it reads device
//! signals, tags the page, registers window and touch listeners, and runs the
//! scene from a `requestAnimationFrame` loop. [`ParticleBackdrop`] is the
//! leptos component that creates the canvas and attaches a backdrop to it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, TouchEvent, Window};

use super::animation::AnimationLoop;
use super::scene::Scene;
use super::types::BackdropConfig;
use crate::components::particle_field::{CanvasSurface, DrawSurface, SurfaceError, find_canvas};
use crate::components::responsive::{QualityEvent, dom, signals};

type SharedScene = Rc<RefCell<Scene<CanvasSurface>>>;

/// A DOM event listener that is unregistered when dropped.
struct EventListener {
	target: EventTarget,
	name: &'static str,
	callback: Closure<dyn FnMut(JsValue)>,
}

impl EventListener {
	fn new(target: &EventTarget, name: &'static str, handler: impl FnMut(JsValue) + 'static) -> Self {
		let callback = Closure::<dyn FnMut(JsValue)>::new(handler);
		if let Err(e) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
			log::warn!("portfolio-fx: could not listen for {name}: {e:?}");
		}
		Self {
			target: target.clone(),
			name,
			callback,
		}
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
	}
}

/// A running backdrop. Dropping it stops the animation loop and removes its
/// event listeners.
pub struct Backdrop {
	scene: SharedScene,
	animation: AnimationLoop,
	listeners: RefCell<Vec<EventListener>>,
}

impl Backdrop {
	/// Size `canvas`, wire listeners and start animating.
	///
	/// With `fullscreen` the canvas tracks the window size; otherwise it keeps
	/// the size of its layout box.
	pub fn attach(
		canvas: HtmlCanvasElement,
		config: BackdropConfig,
		fullscreen: bool,
	) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let device = signals::read_device_signals();

		let (w, h) = if fullscreen {
			(device.viewport_width, device.viewport_height)
		} else {
			layout_size(&canvas).unwrap_or((device.viewport_width, device.viewport_height))
		};

		let mut surface = CanvasSurface::new(canvas)?;
		surface.resize(w, h);

		let scene = Scene::new(surface, config, device, js_sys::Date::now() as u64);
		{
			let c = &scene.controller;
			dom::apply_device_classes(
				c.signals(),
				c.breakpoint(),
				c.performance(),
				c.should_reduce_animations(),
			);
		}
		let scene: SharedScene = Rc::new(RefCell::new(scene));

		scene.borrow_mut().subscribe(|event| match event {
			QualityEvent::BreakpointChanged(bp) => {
				dom::set_breakpoint_attribute(*bp);
				dom::dispatch_breakpoint_change(*bp);
			}
			QualityEvent::OrientationChanged => {
				if let Some((_, height)) = signals::viewport_size() {
					dom::set_viewport_height_var(height);
				}
			}
			QualityEvent::TargetApplied(target) => dom::set_reduced_animations(target.reduce_animation),
			QualityEvent::QualityReduced { .. } => dom::enter_performance_mode(),
			QualityEvent::Swipe(direction) => dom::dispatch_swipe(*direction),
			QualityEvent::FrameTick { .. } => {}
		});

		let listeners = register_listeners(&window, &scene, fullscreen);

		let scene_anim = scene.clone();
		let animation = AnimationLoop::start(move |now| {
			if let Ok(mut s) = scene_anim.try_borrow_mut() {
				s.frame(now);
			}
		});

		log::info!("portfolio-fx: backdrop attached ({}x{})", w, h);
		Ok(Self {
			scene,
			animation,
			listeners: RefCell::new(listeners),
		})
	}

	/// Halt the animation loop and remove the window and touch listeners.
	pub fn stop(&self) {
		self.animation.stop();
		self.listeners.borrow_mut().clear();
	}

	pub fn is_running(&self) -> bool {
		self.animation.is_running()
	}

	/// Current particle count.
	pub fn particle_count(&self) -> usize {
		self.scene.borrow().field.len()
	}
}

fn layout_size(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	let rect = canvas.get_bounding_client_rect();
	let (w, h) = (rect.width(), rect.height());
	(w > 0.0 && h > 0.0).then_some((w, h))
}

fn register_listeners(window: &Window, scene: &SharedScene, fullscreen: bool) -> Vec<EventListener> {
	let mut listeners = Vec::new();

	let scene_resize = scene.clone();
	listeners.push(EventListener::new(window, "resize", move |_| {
		let Some((w, h)) = signals::viewport_size() else {
			return;
		};
		let now = signals::now_ms();
		with_scene(&scene_resize, "resize", |s| {
			if fullscreen {
				s.viewport_changed(now, w, h);
			} else {
				let (cw, ch) = layout_size(s.surface.canvas()).unwrap_or((w, h));
				s.resize_surface(cw, ch);
				s.controller.on_viewport_change(now, w, h);
			}
		});
	}));

	let scene_orient = scene.clone();
	listeners.push(EventListener::new(window, "orientationchange", move |_| {
		let now = signals::now_ms();
		with_scene(&scene_orient, "orientationchange", |s| s.orientation_changed(now));
	}));

	if let Some(document) = window.document() {
		let scene_start = scene.clone();
		listeners.push(EventListener::new(&document, "touchstart", move |ev| {
			if let Some((x, y)) = touch_point(&ev, false) {
				with_scene(&scene_start, "touchstart", |s| s.touch_start(x, y));
			}
		}));

		let scene_end = scene.clone();
		listeners.push(EventListener::new(&document, "touchend", move |ev| {
			if let Some((x, y)) = touch_point(&ev, true) {
				with_scene(&scene_end, "touchend", |s| s.touch_end(x, y));
			}
		}));
	}

	listeners
}

/// Run `f` on the scene unless it is already borrowed, which happens when a
/// DOM event we dispatch re-enters one of our listeners.
fn with_scene(scene: &SharedScene, event: &str, f: impl FnOnce(&mut Scene<CanvasSurface>)) {
	match scene.try_borrow_mut() {
		Ok(mut s) => f(&mut s),
		Err(_) => log::debug!("portfolio-fx: scene busy, skipped {event}"),
	}
}

fn touch_point(ev: &JsValue, changed: bool) -> Option<(f64, f64)> {
	let ev = ev.dyn_ref::<TouchEvent>()?;
	let list = if changed { ev.changed_touches() } else { ev.touches() };
	let touch = list.get(0)?;
	Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Attach a backdrop to the canvas with the given id. A missing canvas is
/// logged and leaves the page without an animation.
pub fn mount_backdrop(canvas_id: &str, config: BackdropConfig) -> Option<Backdrop> {
	let attached =
		find_canvas(canvas_id).and_then(|canvas| Backdrop::attach(canvas, config, true));
	attached_or_disabled(attached)
}

/// A failed attach is logged and leaves the page without an animation.
fn attached_or_disabled<T>(attached: Result<T, SurfaceError>) -> Option<T> {
	match attached {
		Ok(backdrop) => Some(backdrop),
		Err(e) => {
			log::error!("portfolio-fx: {e}; particle backdrop disabled");
			None
		}
	}
}

/// Renders the animated particle background on a canvas.
///
/// Set `fullscreen = true` to size the canvas to the viewport and follow
/// window resizes; otherwise it takes the size of its layout box.
#[component]
pub fn ParticleBackdrop(
	#[prop(default = BackdropConfig::default())] config: BackdropConfig,
	#[prop(default = true)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let backdrop: Rc<RefCell<Option<Backdrop>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if backdrop.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		*backdrop.borrow_mut() = attached_or_disabled(Backdrop::attach(canvas, config.clone(), fullscreen));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particles-canvas"
			class="particles-canvas"
			aria-hidden="true"
			style="display: block; position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_canvas_disables_backdrop() {
		let missing: Result<u8, SurfaceError> =
			Err(SurfaceError::MissingCanvas("particles-canvas".into()));
		assert_eq!(attached_or_disabled(missing), None);
		assert_eq!(attached_or_disabled(Err::<u8, _>(SurfaceError::NoContext)), None);
		assert_eq!(attached_or_disabled(Ok::<u8, SurfaceError>(3)), Some(3));
	}
}
