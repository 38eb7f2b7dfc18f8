use crate::{
	child::{self, Child},
	error::global_document,
};
use tracing::{debug, error, instrument};

/// Where [`mount`] places its content.
#[derive(Debug, Clone)]
pub enum MountTarget<'a> {
	/// Looked up with `getElementById` on the global document.
	Id(&'a str),
	Node(web_sys::Node),
}

impl<'a> From<&'a str> for MountTarget<'a> {
	fn from(id: &'a str) -> Self {
		MountTarget::Id(id)
	}
}

macro_rules! node_targets {
	($($t:ty),*$(,)?) => {$(
		impl From<$t> for MountTarget<'_> {
			fn from(node: $t) -> Self {
				MountTarget::Node(node.into())
			}
		}

		impl From<&$t> for MountTarget<'_> {
			fn from(node: &$t) -> Self {
				MountTarget::Node(node.clone().into())
			}
		}
	)*};
}
node_targets!(web_sys::Node, web_sys::Element, web_sys::HtmlElement, web_sys::DocumentFragment);

/// Replaces all children of `target` with `children`.
///
/// Nothing happens if `target` can't be resolved.
/// The new content is assembled off-tree first, so the old children are swapped out in one step.
#[instrument(skip(children))]
pub fn mount<'a>(target: impl Into<MountTarget<'a>> + core::fmt::Debug, children: impl IntoIterator<Item = Child>) {
	let target = match target.into() {
		MountTarget::Id(id) => {
			let element = global_document().ok().and_then(|document| document.get_element_by_id(id));
			match element {
				Some(element) => web_sys::Node::from(element),
				None => return debug!("No element with id {:?}. Not mounting.", id),
			}
		}
		MountTarget::Node(node) => node,
	};

	let document = match target.owner_document().map_or_else(global_document, Ok) {
		Ok(document) => document,
		Err(error) => return debug!("{} Not mounting.", error),
	};

	let fragment = document.create_document_fragment();
	child::append(&document, &fragment, children);

	target.set_text_content(None);
	if let Err(error) = target.append_child(&fragment) {
		error!("Failed to mount content: {:?}", error);
	}
}
