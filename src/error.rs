use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while building or re-rendering nodes.
///
/// Host exceptions are captured as their [`Debug`](core::fmt::Debug) rendering, since [`JsValue`] is neither [`Send`] nor an [`std::error::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	#[error("no global `window.document` is available")]
	NoDocument,

	#[error("DOM operation failed: {0}")]
	Dom(String),

	#[error("child or producer failed: {0}")]
	Child(String),

	#[error("render handle invoked from within its own producer")]
	Reentrant,
}

impl From<JsValue> for Error {
	fn from(error: JsValue) -> Self {
		Self::Dom(format!("{:?}", error))
	}
}

impl Error {
	/// Wraps any displayable failure reported by a lazy child, deferred child or producer.
	pub fn child(error: impl core::fmt::Display) -> Self {
		Self::Child(error.to_string())
	}
}

pub(crate) fn global_document() -> Result<web_sys::Document, Error> {
	web_sys::window().and_then(|window| window.document()).ok_or(Error::NoDocument)
}
