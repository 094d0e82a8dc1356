//! Cancellable `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `tick` once per animation frame with the frame timestamp (ms) until
/// [`AnimationLoop::stop`] is called.
///
/// The frame closure keeps itself alive through the callback cell it
/// reschedules from, so dropping the handle does not free it; stopping only
/// ends the chain.
pub struct AnimationLoop {
	running: Rc<Cell<bool>>,
}

impl AnimationLoop {
	pub fn start(mut tick: impl FnMut(f64) + 'static) -> Self {
		let running = Rc::new(Cell::new(true));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (running_inner, callback_inner) = (running.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			if !running_inner.get() {
				return;
			}
			tick(now);
			if let Some(ref cb) = *callback_inner.borrow() {
				request_frame(cb);
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			request_frame(cb);
		}
		Self { running }
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Halt the loop. The already-requested frame, if any, returns immediately.
	pub fn stop(&self) {
		if self.running.replace(false) {
			log::debug!("portfolio-fx: animation loop stopped");
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}
