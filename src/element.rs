use crate::{
	child::{self, Child},
	error::global_document,
	props::{self, Props},
	Error,
};
use std::borrow::Cow;
use tracing::{instrument, trace};

/// Which kind of element a [`Tags`] surface creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
	/// Plain markup, created without an explicit namespace.
	Html,
	Svg,
}

impl Namespace {
	pub const SVG_URI: &'static str = "http://www.w3.org/2000/svg";

	#[must_use]
	pub fn uri(self) -> Option<&'static str> {
		match self {
			Namespace::Html => None,
			Namespace::Svg => Some(Self::SVG_URI),
		}
	}
}

/// Creates a `tag` element in `namespace`, binds `props` onto it and then appends `children`.
///
/// The tag name isn't validated here.
///
/// # Errors
///
/// Fails if the host rejects the tag name or if binding any property fails.
/// Failing children are logged and skipped instead.
#[instrument(skip(document, children))]
pub fn create(document: &web_sys::Document, namespace: Namespace, tag: &str, props: Props, children: impl IntoIterator<Item = Child>) -> Result<web_sys::Element, Error> {
	let element = match namespace.uri() {
		None => document.create_element(tag)?,
		Some(uri) => document.create_element_ns(Some(uri), tag)?,
	};
	trace!("Created element.");

	props::bind_props(&element, namespace, props)?;
	child::append(document, &element, children);
	Ok(element)
}

/// A per-namespace element factory.
///
/// ```rust,no_run
/// use sprig_dom::{children, Props, Tags};
///
/// # fn main() -> Result<(), sprig_dom::Error> {
/// let html = Tags::html()?;
/// let button = html.create("button", Props::new().set("class", "primary"), children!["Click"])?;
/// # drop(button);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Tags {
	document: web_sys::Document,
	namespace: Namespace,
}

impl Tags {
	#[must_use]
	pub fn new(document: web_sys::Document, namespace: Namespace) -> Self {
		Self { document, namespace }
	}

	/// Plain markup tags on the global document.
	///
	/// # Errors
	///
	/// Iff there is no global `window.document`.
	pub fn html() -> Result<Self, Error> {
		Ok(Self::new(global_document()?, Namespace::Html))
	}

	/// SVG tags on the global document.
	///
	/// # Errors
	///
	/// Iff there is no global `window.document`.
	pub fn svg() -> Result<Self, Error> {
		Ok(Self::new(global_document()?, Namespace::Svg))
	}

	#[must_use]
	pub fn namespace(&self) -> Namespace {
		self.namespace
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// See [`create`].
	///
	/// # Errors
	///
	/// See [`create`].
	pub fn create(&self, tag: &str, props: Props, children: impl IntoIterator<Item = Child>) -> Result<web_sys::Element, Error> {
		create(&self.document, self.namespace, tag, props, children)
	}

	/// A constructor bound to `name`. Any name is accepted, custom elements included.
	#[must_use]
	pub fn tag(&self, name: impl Into<Cow<'static, str>>) -> Tag {
		Tag {
			tags: self.clone(),
			name: name.into(),
		}
	}
}

/// A constructor for one tag name in one namespace, obtained from [`Tags::tag`].
#[derive(Debug, Clone)]
pub struct Tag {
	tags: Tags,
	name: Cow<'static, str>,
}

impl Tag {
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn namespace(&self) -> Namespace {
		self.tags.namespace
	}

	/// # Errors
	///
	/// See [`create`].
	pub fn call(&self, props: Props, children: impl IntoIterator<Item = Child>) -> Result<web_sys::Element, Error> {
		self.tags.create(&self.name, props, children)
	}
}
