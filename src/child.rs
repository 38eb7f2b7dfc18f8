//! Child descriptors and their normalisation into appended DOM content.

use crate::Error;
use core::{
	fmt::{self, Debug, Formatter},
	future::Future,
	pin::Pin,
};
use tracing::{error, instrument, trace, trace_span, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Something that can be appended to an element.
pub enum Child {
	Text(String),
	Node(web_sys::Node),
	/// Evaluated at append time. May return another [`Child::Lazy`].
	Lazy(Box<dyn FnOnce() -> Result<Child, Error>>),
	/// Holds its position with an empty text node until settled.
	Deferred(Pin<Box<dyn Future<Output = Result<Child, Error>>>>),
}

impl Child {
	pub fn lazy<C: 'static + Into<Child>>(produce: impl 'static + FnOnce() -> C) -> Self {
		Child::Lazy(Box::new(move || Ok(produce().into())))
	}

	pub fn try_lazy<C: 'static + Into<Child>, E: 'static + fmt::Display>(produce: impl 'static + FnOnce() -> Result<C, E>) -> Self {
		Child::Lazy(Box::new(move || produce().map(Into::into).map_err(Error::child)))
	}

	pub fn deferred<C: 'static + Into<Child>, E: 'static + fmt::Display>(future: impl 'static + Future<Output = Result<C, E>>) -> Self {
		Child::Deferred(Box::pin(async move { future.await.map(Into::into).map_err(Error::child) }))
	}
}

impl Debug for Child {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Child::Text(text) if cfg!(feature = "dangerous-logging") => f.debug_tuple("Text").field(text).finish(),
			Child::Text(text) => write!(f, "Text(<{} bytes>)", text.len()),
			Child::Node(node) => write!(f, "Node({})", node.node_name()),
			Child::Lazy(_) => f.write_str("Lazy(..)"),
			Child::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Child::Text(text)
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Child::Text(text.to_owned())
	}
}

impl From<&String> for Child {
	fn from(text: &String) -> Self {
		Child::Text(text.clone())
	}
}

macro_rules! display_children {
	($($t:ty),*$(,)?) => {$(
		impl From<$t> for Child {
			fn from(value: $t) -> Self {
				Child::Text(crate::props::Value::from(value).to_attribute().into_owned())
			}
		}
	)*};
}
display_children!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! node_children {
	($($t:ty),*$(,)?) => {$(
		impl From<$t> for Child {
			fn from(node: $t) -> Self {
				Child::Node(node.into())
			}
		}

		impl From<&$t> for Child {
			fn from(node: &$t) -> Self {
				Child::Node(node.clone().into())
			}
		}
	)*};
}
node_children!(web_sys::Node, web_sys::Element, web_sys::HtmlElement, web_sys::SvgElement, web_sys::Text, web_sys::DocumentFragment);

/// The promise must resolve to a [`web_sys::Node`] or a string.
impl From<js_sys::Promise> for Child {
	fn from(promise: js_sys::Promise) -> Self {
		Child::Deferred(Box::pin(async move {
			let settled = JsFuture::from(promise).await?;
			from_settled(settled)
		}))
	}
}

fn from_settled(value: JsValue) -> Result<Child, Error> {
	if let Some(text) = value.as_string() {
		return Ok(Child::Text(text));
	}
	match value.dyn_into::<web_sys::Node>() {
		Ok(node) => Ok(Child::Node(node)),
		Err(value) => Err(Error::Child(format!("Promise settled with neither a string nor a Node: {:?}", value))),
	}
}

/// Appends `children` to `parent`, in order.
///
/// A child that fails is logged and skipped without affecting its siblings.
/// Deferred children are driven to completion on the current thread's executor.
#[instrument(skip(parent, children))]
pub fn append(document: &web_sys::Document, parent: &web_sys::Node, children: impl IntoIterator<Item = Child>) {
	for (i, child) in children.into_iter().enumerate() {
		let span = trace_span!("Appending child", i);
		let _enter = span.enter();
		if let Err(error) = append_child(document, parent, child) {
			error!("Skipping child #{}: {}", i, error);
		}
	}
}

fn append_child(document: &web_sys::Document, parent: &web_sys::Node, mut child: Child) -> Result<(), Error> {
	loop {
		child = match child {
			Child::Lazy(produce) => produce()?,
			Child::Text(text) => {
				parent.append_child(&document.create_text_node(&text))?;
				return Ok(());
			}
			Child::Node(node) => {
				parent.append_child(&node)?;
				return Ok(());
			}
			Child::Deferred(future) => {
				let placeholder = document.create_text_node("");
				parent.append_child(&placeholder)?;
				trace!("Placed placeholder for deferred child.");

				let document = document.clone();
				spawn_local(async move {
					match future.await {
						Ok(settled) => settle(&document, &placeholder, settled),
						Err(error) => error!("Deferred child failed; leaving placeholder in place: {}", error),
					}
				});
				return Ok(());
			}
		}
	}
}

/// Swaps `placeholder` for the settled content, wherever the placeholder currently is.
#[instrument(skip(document, placeholder))]
fn settle(document: &web_sys::Document, placeholder: &web_sys::Text, settled: Child) {
	let parent = match placeholder.parent_node() {
		Some(parent) => parent,
		None => return warn!("Placeholder was detached before its deferred child settled. Dropping the content."),
	};

	let fragment = document.create_document_fragment();
	if let Err(error) = append_child(document, &fragment, settled) {
		return error!("Settled child failed; leaving placeholder in place: {}", error);
	}
	if let Err(error) = parent.replace_child(&fragment, placeholder) {
		error!("Failed to replace placeholder: {:?}", error);
	}
}

/// Builds a `Vec<Child>` from expressions of any type convertible into [`Child`].
///
/// ```rust,no_run
/// use sprig_dom::{children, Child};
///
/// let children: Vec<Child> = children!["Count: ", 3, Child::lazy(|| "!")];
/// # drop(children);
/// ```
#[macro_export]
macro_rules! children {
	($($child:expr),*$(,)?) => {
		::std::vec![$($crate::Child::from($child)),*]
	};
}
