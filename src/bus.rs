//! Named application events with an optional payload, passed around explicitly rather than through a global.

use crate::Error;
use core::cell::RefCell;
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// A publish/subscribe channel keyed by event name.
pub trait EventBus {
	/// Delivers `detail` to every handler currently listening to `name`.
	///
	/// # Errors
	///
	/// If the host refuses to construct or dispatch the event.
	fn dispatch(&self, name: &str, detail: JsValue) -> Result<(), Error>;

	/// # Errors
	///
	/// If the host refuses to register the listener.
	fn listen(&self, name: &str, handler: Box<dyn FnMut(JsValue)>) -> Result<(), Error>;
}

/// Rides on a host [`web_sys::EventTarget`] using `CustomEvent`s.
#[derive(Debug, Clone)]
pub struct WindowBus {
	target: web_sys::EventTarget,
}

impl WindowBus {
	/// Uses the global `window`.
	///
	/// # Errors
	///
	/// Iff there is no global `window`.
	pub fn new() -> Result<Self, Error> {
		let window = web_sys::window().ok_or(Error::NoDocument)?;
		Ok(Self::on_target(window.into()))
	}

	#[must_use]
	pub fn on_target(target: web_sys::EventTarget) -> Self {
		Self { target }
	}
}

impl EventBus for WindowBus {
	#[instrument(skip(detail))]
	fn dispatch(&self, name: &str, detail: JsValue) -> Result<(), Error> {
		let mut init = web_sys::CustomEventInit::new();
		init.detail(&detail);
		let event = web_sys::CustomEvent::new_with_event_init_dict(name, &init)?;
		self.target.dispatch_event(&event)?;
		Ok(())
	}

	#[instrument(skip(handler))]
	fn listen(&self, name: &str, mut handler: Box<dyn FnMut(JsValue)>) -> Result<(), Error> {
		let listener = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let detail = event.dyn_ref::<web_sys::CustomEvent>().map_or(JsValue::UNDEFINED, web_sys::CustomEvent::detail);
			handler(detail)
		}) as Box<dyn FnMut(web_sys::Event)>)
		.into_js_value();
		self.target.add_event_listener_with_callback(name, listener.unchecked_ref())?;
		Ok(())
	}
}

type Handler = Rc<RefCell<dyn FnMut(JsValue)>>;

/// An in-memory bus, independent of any host event target.
///
/// Handlers run in registration order.
/// Handlers registered during a dispatch only see later dispatches.
/// A handler that re-dispatches its own event is skipped for that nested dispatch.
#[derive(Default, Clone)]
pub struct LocalBus {
	handlers: Rc<RefCell<HashMap<String, Vec<Handler>>>>,
}

impl core::fmt::Debug for LocalBus {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let handlers = self.handlers.borrow();
		f.debug_map().entries(handlers.iter().map(|(name, handlers)| (name, handlers.len()))).finish()
	}
}

impl LocalBus {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn listener_count(&self, name: &str) -> usize {
		self.handlers.borrow().get(name).map_or(0, Vec::len)
	}
}

impl EventBus for LocalBus {
	#[instrument(skip(detail))]
	fn dispatch(&self, name: &str, detail: JsValue) -> Result<(), Error> {
		let handlers = match self.handlers.borrow().get(name) {
			Some(handlers) => handlers.clone(),
			None => {
				trace!("No listeners.");
				return Ok(());
			}
		};
		for handler in handlers {
			match handler.try_borrow_mut() {
				Ok(mut handler) => (&mut *handler)(detail.clone()),
				Err(_) => trace!("Skipping handler that is already running."),
			}
		}
		Ok(())
	}

	#[instrument(skip(handler))]
	fn listen(&self, name: &str, handler: Box<dyn FnMut(JsValue)>) -> Result<(), Error> {
		let handler: Handler = Rc::new(RefCell::new(handler));
		self.handlers.borrow_mut().entry(name.to_owned()).or_default().push(handler);
		Ok(())
	}
}
