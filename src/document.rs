//! Document access.
//!
//! [`Document`] wraps the host's root document. The global object is passed
//! in explicitly rather than looked up implicitly, which keeps everything
//! built on top of it testable against [`crate::testing::FakeHost`].

use crate::debug::Describe;
use crate::error::{DomError, Result};
use crate::value::ForeignValue;

/// Handle to the host document.
///
/// Created once at startup and kept for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Document<V: ForeignValue> {
	doc: V,
}

impl<V: ForeignValue> Document<V> {
	/// Obtains the document from the host's global object.
	///
	/// # Errors
	///
	/// Returns [`DomError::Environment`] if `global.document` is falsy, e.g.
	/// when running in a worker or outside a browser.
	pub fn acquire(global: &V) -> Result<Self> {
		Self::from_value(global.get("document"))
	}

	/// Wraps an explicitly provided document value.
	///
	/// # Errors
	///
	/// Returns [`DomError::Environment`] if `doc` is falsy.
	pub fn from_value(doc: V) -> Result<Self> {
		if !doc.is_truthy() {
			return Err(DomError::Environment("document".to_string()));
		}
		Ok(Self { doc })
	}

	/// Returns the wrapped document value.
	pub fn as_value(&self) -> &V {
		&self.doc
	}

	/// Looks up an element by its `id` attribute.
	///
	/// Never returns a falsy value: a missing element is always reported as
	/// [`DomError::NotFound`].
	///
	/// # Errors
	///
	/// Returns [`DomError::NotFound`] carrying `id` when no element matches,
	/// or [`DomError::Host`] if the host threw.
	pub fn get_element_by_id(&self, id: &str) -> Result<V> {
		let element = self.doc.call("getElementById", &[V::from_string(id)])?;
		if !element.is_truthy() {
			return Err(DomError::NotFound(id.to_string()));
		}
		Ok(element)
	}

	/// Creates a new, unattached element.
	///
	/// Unknown tag names produce an inert element rather than an error. If
	/// the host throws anyway, the failure is logged and `undefined` is
	/// returned.
	pub fn create_element(&self, tag: &str) -> V {
		match self.doc.call("createElement", &[V::from_string(tag)]) {
			Ok(element) => element,
			Err(err) => {
				crate::error_log!(
					"createElement({:?}) failed on {}: {}",
					tag,
					Describe(&self.doc),
					err
				);
				V::undefined()
			}
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl Document<wasm_bindgen::JsValue> {
	/// Obtains the document of the current browsing context.
	///
	/// # Errors
	///
	/// Returns [`DomError::Environment`] when no document is available.
	pub fn from_window() -> Result<Self> {
		Self::acquire(&js_sys::global().into())
	}
}
