//! Property maps and how they are bound onto freshly created elements.
//!
//! Each entry of a [`Props`] ends up as exactly one of:
//!
//! - an event listener, if the entry is a [`Prop::Handler`],
//! - a native (typed) property assignment, if the element exposes the key as a property and is not namespaced,
//! - a string attribute otherwise.
//!
//! Keys starting with `on` are reserved for event handlers and never become attributes or properties.

use crate::{element::Namespace, Error};
use core::fmt::{self, Debug, Formatter};
use std::borrow::Cow;
use tracing::{instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

const HANDLER_PREFIX: &str = "on";

/// A literal property value.
#[derive(Clone, PartialEq)]
pub enum Value {
	Str(String),
	Number(f64),
	Bool(bool),
	/// Skipped entirely when bound.
	Undefined,
}

impl Value {
	/// The typed JavaScript value used for native property assignment.
	#[must_use]
	pub fn to_js(&self) -> JsValue {
		match self {
			Value::Str(s) => JsValue::from_str(s),
			Value::Number(n) => JsValue::from_f64(*n),
			Value::Bool(b) => JsValue::from_bool(*b),
			Value::Undefined => JsValue::UNDEFINED,
		}
	}

	/// String coercion as the host performs it for attribute values.
	#[must_use]
	pub fn to_attribute(&self) -> Cow<'_, str> {
		match self {
			Value::Str(s) => Cow::Borrowed(s),
			Value::Number(n) => Cow::Owned(number_to_string(*n)),
			Value::Bool(true) => Cow::Borrowed("true"),
			Value::Bool(false) => Cow::Borrowed("false"),
			Value::Undefined => Cow::Borrowed("undefined"),
		}
	}
}

/// `Number.prototype.toString`, so exponent thresholds match the host's own coercion.
#[cfg(target_arch = "wasm32")]
fn number_to_string(n: f64) -> String {
	// Radix 10 never throws.
	js_sys::Number::from(n).to_string(10).map_or_else(|_| n.to_string(), String::from)
}

/// Host-independent approximation for native builds. Only agrees with the host in the plain decimal range.
#[cfg(not(target_arch = "wasm32"))]
fn number_to_string(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_owned()
	} else if n.is_infinite() {
		(if n > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
	} else if n == 0.0 {
		// Covers `-0.0`.
		"0".to_owned()
	} else {
		n.to_string()
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Str(s) if cfg!(feature = "dangerous-logging") => f.debug_tuple("Str").field(s).finish(),
			Value::Str(s) => write!(f, "Str(<{} bytes>)", s.len()),
			Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Value::Undefined => f.write_str("Undefined"),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Str(s)
	}
}

impl From<Cow<'_, str>> for Value {
	fn from(s: Cow<'_, str>) -> Self {
		Value::Str(s.into_owned())
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

macro_rules! number_values {
	($($t:ty),*$(,)?) => {$(
		impl From<$t> for Value {
			#[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
			fn from(n: $t) -> Self {
				Value::Number(n as f64)
			}
		}
	)*};
}
number_values!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Undefined, Into::into)
	}
}

/// One entry of a [`Props`] map.
pub enum Prop {
	Value(Value),
	/// Resolved once, when bound.
	Computed(Box<dyn FnOnce() -> Result<Value, Error>>),
	Handler(Box<dyn FnMut(web_sys::Event)>),
}

impl Debug for Prop {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Prop::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Prop::Computed(_) => f.write_str("Computed(..)"),
			Prop::Handler(_) => f.write_str("Handler(..)"),
		}
	}
}

/// An insertion-ordered property map.
///
/// ```rust,no_run
/// use sprig_dom::Props;
///
/// let props = Props::new()
/// 	.set("class", "primary")
/// 	.set("disabled", true)
/// 	.compute("value", || "hello")
/// 	.on("onClick", |_event| ());
/// # drop(props);
/// ```
#[derive(Debug, Default)]
pub struct Props(Vec<(Cow<'static, str>, Prop)>);

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn insert(mut self, key: impl Into<Cow<'static, str>>, prop: Prop) -> Self {
		self.0.push((key.into(), prop));
		self
	}

	#[must_use]
	pub fn set(self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
		self.insert(key, Prop::Value(value.into()))
	}

	#[must_use]
	pub fn compute<V: 'static + Into<Value>>(self, key: impl Into<Cow<'static, str>>, compute: impl 'static + FnOnce() -> V) -> Self {
		self.insert(key, Prop::Computed(Box::new(move || Ok(compute().into()))))
	}

	/// Like [`Props::compute`], but a failure aborts element creation with [`Error::Child`].
	#[must_use]
	pub fn try_compute<V: 'static + Into<Value>, E: 'static + fmt::Display>(self, key: impl Into<Cow<'static, str>>, compute: impl 'static + FnOnce() -> Result<V, E>) -> Self {
		self.insert(key, Prop::Computed(Box::new(move || compute().map(Into::into).map_err(Error::child))))
	}

	/// Registers `handler` for the event named by `key`, which is conventionally `on` followed by the capitalised event name (`"onClick"` listens to `click`).
	#[must_use]
	pub fn on(self, key: impl Into<Cow<'static, str>>, handler: impl 'static + FnMut(web_sys::Event)) -> Self {
		self.insert(key, Prop::Handler(Box::new(handler)))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K: Into<Cow<'static, str>>> Extend<(K, Prop)> for Props {
	fn extend<I: IntoIterator<Item = (K, Prop)>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(|(key, prop)| (key.into(), prop)))
	}
}

impl<K: Into<Cow<'static, str>>> core::iter::FromIterator<(K, Prop)> for Props {
	fn from_iter<I: IntoIterator<Item = (K, Prop)>>(iter: I) -> Self {
		let mut props = Self::new();
		props.extend(iter);
		props
	}
}

/// `"onClick"` → `"click"`, `"onMouseEnter"` → `"mouseenter"`.
///
/// Keys without the handler prefix are used whole.
#[must_use]
pub fn event_name(key: &str) -> String {
	key.strip_prefix(HANDLER_PREFIX).unwrap_or(key).to_ascii_lowercase()
}

fn is_handler_key(key: &str) -> bool {
	key.len() > HANDLER_PREFIX.len() && key.starts_with(HANDLER_PREFIX)
}

/// Applies each entry of `props` to `element`, in order.
///
/// # Errors
///
/// The first [`Prop::Computed`] failure or rejected host call is returned as-is.
/// Entries before it have already been applied.
/// Assigning to a read-only native property is an [`Error::Dom`].
#[instrument(skip(element))]
pub fn bind_props(element: &web_sys::Element, namespace: Namespace, props: Props) -> Result<(), Error> {
	for (key, prop) in props.0 {
		let span = trace_span!("Binding property", key = &*key);
		let _enter = span.enter();

		let value = match prop {
			Prop::Handler(handler) => {
				add_listener(element, &event_name(&key), handler)?;
				continue;
			}
			_ if is_handler_key(&key) => {
				warn!("Skipping non-handler value under reserved event key {:?}.", key);
				continue;
			}
			Prop::Value(value) => value,
			Prop::Computed(compute) => compute()?,
		};

		if value == Value::Undefined {
			trace!("Undefined value. Skipping.");
			continue;
		}

		if namespace == Namespace::Html && js_sys::Reflect::has(element, &JsValue::from_str(&key))? {
			trace!(?value, "Assigning native property.");
			if !js_sys::Reflect::set(element, &JsValue::from_str(&key), &value.to_js())? {
				return Err(Error::Dom(format!("native property {:?} is read-only", key)));
			}
		} else {
			trace!(?value, "Setting attribute.");
			element.set_attribute(&key, &value.to_attribute())?;
		}
	}
	Ok(())
}

fn add_listener(element: &web_sys::Element, event: &str, handler: Box<dyn FnMut(web_sys::Event)>) -> Result<(), Error> {
	trace!(event, "Adding event listener.");
	// Ownership passes to the JS side, so the closure lives as long as the element references it.
	let closure = Closure::wrap(handler).into_js_value();
	element.add_event_listener_with_callback(event, closure.unchecked_ref())?;
	Ok(())
}
