//! Reinhardt DOM - Defensive DOM access for WASM frontends
//!
//! A thin layer over the browser's document object model that never lets a
//! malformed host value crash the application. Every read tolerates missing
//! attributes, every lookup reports failure as a typed error, and every event
//! listener validates what the host hands it before running user code.
//!
//! ## Architecture
//!
//! - [`value`]: The [`ForeignValue`] bridge to host values (kind, truthiness,
//!   property access, method calls, native callables)
//! - [`document`]: Document handle with element lookup and creation
//! - [`listener`]: Event listeners with stable callable identity
//! - [`class_list`]: Live view over an element's CSS classes
//! - [`debug`]: Human-readable labels for host values
//! - [`testing`]: In-memory host for native tests
//!
//! Everything is generic over [`ForeignValue`]. On `wasm32` the bridge is
//! implemented for [`wasm_bindgen::JsValue`]; native builds use
//! [`testing::FakeValue`].
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_dom::{ClassList, Document, EventListener};
//! use wasm_bindgen::JsValue;
//!
//! let document = Document::from_window()?;
//! let button = document.get_element_by_id("save")?;
//!
//! let listener = EventListener::new("click", |subject: JsValue, _event: JsValue| {
//!     ClassList::of(&subject).toggle("active");
//!     JsValue::UNDEFINED
//! });
//! listener.attach(&button)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `debug-hooks`: Emit per-invocation listener traces to the console (WASM
//!   debug builds only)
//! - `console_error_panic_hook`: Route Rust panics to `console.error`

#![warn(missing_docs)]

pub mod class_list;
pub mod debug;
pub mod document;
pub mod error;
pub mod listener;
pub mod logging;
pub mod value;

// Testing utilities
pub mod testing;

pub use class_list::ClassList;
pub use debug::{Describe, describe};
pub use document::Document;
pub use error::{DomError, Result};
pub use listener::{Attachment, EventListener, ListenerOptions, ListenerState};
#[cfg(target_arch = "wasm32")]
pub use value::js::JsCallable;
pub use value::{ForeignValue, NativeCallable, ValueKind};

// Logging macros are automatically exported via #[macro_export]
// Users can access them as: reinhardt_dom::debug_log!, reinhardt_dom::warn_log!, etc.

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}

/// Installs a panic hook that forwards panic messages to the browser console.
///
/// Safe to call more than once.
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
	console_error_panic_hook::set_once();
}
