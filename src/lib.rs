//! Builds real DOM element trees from nested calls and re-renders them without a virtual DOM.
//!
//! - [`Tags`] / [`create`]: element construction from a tag name, [`Props`] and [`Child`]ren.
//! - [`mount`]: wholesale replacement of a container's children.
//! - [`bind`]: a [`RenderHandle`] that re-runs a producer into one stable container element.
//! - [`EventBus`]: named application events, passed explicitly.

#![doc(html_root_url = "https://docs.rs/sprig-dom/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod bus;
mod child;
mod element;
mod error;
mod mount;
pub mod props;
mod render;

pub use {
	bus::{EventBus, LocalBus, WindowBus},
	child::{append, Child},
	element::{create, Namespace, Tag, Tags},
	error::Error,
	mount::{mount, MountTarget},
	props::{Prop, Props, Value},
	render::{bind, safe, safe_or, RenderHandle, Rendered},
};
