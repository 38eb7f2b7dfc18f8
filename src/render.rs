//! Re-rendering through a stable container.
//!
//! A [`RenderHandle`] owns one container element, created on the first successful call.
//! Every later call replaces only the container's children, so the returned root stays the same element
//! no matter whether the producer yields nothing, one node or many.

use crate::{child::Child, error::global_document, Error};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Display, Formatter},
};
use std::{borrow::Cow, rc::Rc};
use tracing::{error, instrument, trace};

/// Normalised producer output: `null`s are dropped, order is kept.
#[derive(Debug, Clone, Default)]
pub struct Rendered(Vec<web_sys::Node>);

impl Rendered {
	#[must_use]
	pub fn empty() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn into_nodes(self) -> Vec<web_sys::Node> {
		self.0
	}
}

impl From<()> for Rendered {
	fn from((): ()) -> Self {
		Self::empty()
	}
}

macro_rules! rendered_from {
	($($t:ty),*$(,)?) => {$(
		impl From<$t> for Rendered {
			fn from(node: $t) -> Self {
				Self(vec![node.into()])
			}
		}

		impl From<Option<$t>> for Rendered {
			fn from(node: Option<$t>) -> Self {
				Self(node.into_iter().map(Into::into).collect())
			}
		}

		impl From<Vec<$t>> for Rendered {
			fn from(nodes: Vec<$t>) -> Self {
				Self(nodes.into_iter().map(Into::into).collect())
			}
		}

		impl From<Vec<Option<$t>>> for Rendered {
			fn from(nodes: Vec<Option<$t>>) -> Self {
				Self(nodes.into_iter().flatten().map(Into::into).collect())
			}
		}
	)*};
}
rendered_from!(web_sys::Node, web_sys::Element, web_sys::HtmlElement, web_sys::SvgElement, web_sys::Text);

struct State {
	document: Option<web_sys::Document>,
	container_tag: Cow<'static, str>,
	container: Option<web_sys::Element>,
	retained: Vec<web_sys::Node>,
}

impl State {
	fn container(&mut self) -> Result<web_sys::Element, Error> {
		if let Some(container) = &self.container {
			return Ok(container.clone());
		}

		let document = match &self.document {
			Some(document) => document.clone(),
			None => global_document()?,
		};
		let container = document.create_element(&self.container_tag)?;
		container.set_attribute("style", "display: contents")?;
		trace!(tag = &*self.container_tag, "Created render container.");

		self.document = Some(document);
		self.container = Some(container.clone());
		Ok(container)
	}
}

/// Returned by [`bind`]. Cloning shares the producer and the container.
pub struct RenderHandle<A, R, E> {
	producer: Rc<RefCell<dyn FnMut(A) -> Result<R, E>>>,
	state: Rc<RefCell<State>>,
}

impl<A, R, E> Clone for RenderHandle<A, R, E> {
	fn clone(&self) -> Self {
		Self {
			producer: Rc::clone(&self.producer),
			state: Rc::clone(&self.state),
		}
	}
}

impl<A, R, E> Debug for RenderHandle<A, R, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("RenderHandle");
		if let Ok(state) = self.state.try_borrow() {
			debug
				.field("container_tag", &state.container_tag)
				.field("container", &state.container)
				.field("retained.len()", &state.retained.len());
		} else {
			debug.field("state", &"<rendering>");
		}
		debug.finish_non_exhaustive()
	}
}

/// Wraps `producer` into a [`RenderHandle`] rendering into a `<div style="display: contents">` on the global document.
///
/// ```rust,no_run
/// use sprig_dom::{bind, children, Error, Props, Tags};
///
/// # fn main() -> Result<(), Error> {
/// let html = Tags::html()?;
/// let counter = bind(move |count: u32| html.create("span", Props::new(), children![count]));
///
/// let root = counter.invoke(0)?;
/// assert_eq!(counter.invoke(1)?, root);
/// # Ok(()) }
/// ```
pub fn bind<A, R, E, F>(producer: F) -> RenderHandle<A, R, E>
where
	F: 'static + FnMut(A) -> Result<R, E>,
{
	RenderHandle {
		producer: Rc::new(RefCell::new(producer)),
		state: Rc::new(RefCell::new(State {
			document: None,
			container_tag: Cow::Borrowed("div"),
			container: None,
			retained: Vec::new(),
		})),
	}
}

impl<A, R, E> RenderHandle<A, R, E>
where
	R: Into<Rendered>,
	E: From<Error>,
{
	/// Creates the container in `document` instead of the global one.
	///
	/// Has no effect once the container exists.
	#[must_use]
	pub fn with_document(self, document: web_sys::Document) -> Self {
		{
			let mut state = self.state.borrow_mut();
			if state.container.is_none() {
				state.document = Some(document);
			}
		}
		self
	}

	/// Has no effect once the container exists.
	#[must_use]
	pub fn with_container_tag(self, tag: impl Into<Cow<'static, str>>) -> Self {
		{
			let mut state = self.state.borrow_mut();
			if state.container.is_none() {
				state.container_tag = tag.into();
			}
		}
		self
	}

	/// Re-runs the producer and swaps its output into the container, which is returned.
	///
	/// # Errors
	///
	/// Producer errors are passed through unchanged, in which case nothing is updated.
	/// The same goes for output the container can't hold, like the container itself or one of its ancestors.
	/// [`Error::Reentrant`] if called from within the producer itself.
	#[instrument(skip(self, args))]
	pub fn invoke(&self, args: A) -> Result<web_sys::Element, E> {
		let rendered: Rendered = {
			let mut producer = self.producer.try_borrow_mut().map_err(|_| Error::Reentrant)?;
			(&mut *producer)(args)?.into()
		};
		let nodes = rendered.into_nodes();
		trace!(count = nodes.len(), "Producer returned.");

		let mut state = self.state.try_borrow_mut().map_err(|_| Error::Reentrant)?;
		let container = state.container()?;
		let document = container.owner_document().ok_or(Error::NoDocument)?;

		let container_node: &web_sys::Node = &container;
		if let Some(node) = nodes.iter().find(|node| node.contains(Some(container_node))) {
			return Err(Error::Dom(format!("rendered {} would contain its own container", node.node_name())).into());
		}

		let fragment = document.create_document_fragment();
		for node in &nodes {
			if let Err(error) = fragment.append_child(node) {
				restore(&container, &state.retained);
				return Err(Error::from(error).into());
			}
		}
		container.set_text_content(None);
		if let Err(error) = container.append_child(&fragment) {
			restore(&container, &state.retained);
			return Err(Error::from(error).into());
		}

		state.retained = nodes;
		Ok(container)
	}

	/// The container, if any call has succeeded yet.
	#[must_use]
	pub fn container(&self) -> Option<web_sys::Element> {
		self.state.borrow().container.clone()
	}

	/// How many nodes the latest successful call produced.
	#[must_use]
	pub fn retained_len(&self) -> usize {
		self.state.borrow().retained.len()
	}
}

/// Puts the previous output back after a failed swap moved some of it out.
fn restore(container: &web_sys::Element, retained: &[web_sys::Node]) {
	container.set_text_content(None);
	for node in retained {
		if let Err(error) = container.append_child(node) {
			error!("Failed to restore previous render output: {:?}", error);
		}
	}
}

/// Runs `producer`, substituting the text `"Error"` if it fails.
pub fn safe<N: Into<Child>, E: Display>(producer: impl FnOnce() -> Result<N, E>) -> Child {
	safe_or(producer, "Error")
}

/// Runs `producer`, substituting `fallback` if it fails. The failure is logged.
pub fn safe_or<N: Into<Child>, E: Display>(producer: impl FnOnce() -> Result<N, E>, fallback: impl Into<Child>) -> Child {
	match producer() {
		Ok(content) => content.into(),
		Err(error) => {
			error!("Producer failed, rendering fallback: {}", error);
			fallback.into()
		}
	}
}
