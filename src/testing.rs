//! Testing utilities.
//!
//! An in-memory host that implements the same capability set as the browser,
//! so code written against [`ForeignValue`] can be exercised on native
//! targets without a JavaScript engine.
//!
//! ## Example
//!
//! ```
//! use reinhardt_dom::testing::FakeHost;
//! use reinhardt_dom::{ClassList, Document};
//!
//! let host = FakeHost::new();
//! let button = host.insert_element("button", "save");
//! FakeHost::set_classes(&button, &["primary"]);
//!
//! let document = Document::acquire(host.global()).unwrap();
//! let found = document.get_element_by_id("save").unwrap();
//! assert!(ClassList::of(&found).contains("primary"));
//! ```

mod value;

use std::cell::RefCell;

pub use value::{FakeCallable, FakeFunction, FakeObject, FakeValue};
use value::{Backing, Registration};

use crate::error::Result;
use crate::value::ForeignValue;

/// A fake host environment: a global object carrying a `document`.
#[derive(Debug, Clone)]
pub struct FakeHost {
	global: FakeValue,
	document: FakeValue,
}

impl Default for FakeHost {
	fn default() -> Self {
		Self::new()
	}
}

impl FakeHost {
	/// Creates a host whose global object exposes an empty document.
	pub fn new() -> Self {
		let document = FakeValue::with_backing(Backing::Document(RefCell::new(Vec::new())));
		let global = FakeValue::object();
		global.set_property("document", document.clone());
		Self { global, document }
	}

	/// Creates a host whose global object has no `document`, as in a worker.
	pub fn without_document() -> Self {
		Self {
			global: FakeValue::object(),
			document: FakeValue::Undefined,
		}
	}

	/// Returns the global object.
	pub fn global(&self) -> &FakeValue {
		&self.global
	}

	/// Returns the document value (`undefined` for [`FakeHost::without_document`]).
	pub fn document(&self) -> &FakeValue {
		&self.document
	}

	/// Creates a detached element, like `document.createElement`.
	pub fn create_element(&self, tag: &str) -> FakeValue {
		new_element(tag)
	}

	/// Creates an element with the given id and inserts it into the document.
	pub fn insert_element(&self, tag: &str, id: &str) -> FakeValue {
		let element = new_element(tag);
		element.set_property("id", id);
		self.append(&element);
		element
	}

	/// Inserts an element into the document so `getElementById` can find it.
	pub fn append(&self, element: &FakeValue) {
		if let Some(Backing::Document(elements)) = self.document.backing() {
			elements.borrow_mut().push(element.clone());
		}
	}

	/// Removes an element from the document.
	pub fn remove(&self, element: &FakeValue) {
		if let Some(Backing::Document(elements)) = self.document.backing() {
			elements
				.borrow_mut()
				.retain(|existing| !existing.same_value(element));
		}
	}

	/// Replaces the classes of an element, creating a class list if needed.
	pub fn set_classes(element: &FakeValue, classes: &[&str]) {
		let names = classes.iter().map(|name| name.to_string()).collect();
		let list = element.get("classList");
		if let Some(Backing::TokenList(tokens)) = list.backing() {
			*tokens.borrow_mut() = names;
			return;
		}
		element.set_property(
			"classList",
			FakeValue::with_backing(Backing::TokenList(RefCell::new(names))),
		);
	}

	/// Creates an event object with `type`, `target` and `currentTarget`.
	pub fn event(kind: &str, target: &FakeValue) -> FakeValue {
		let event = FakeValue::object();
		event.set_property("type", kind);
		event.set_property("target", target.clone());
		event.set_property("currentTarget", target.clone());
		event
	}

	/// Dispatches an event of type `kind` at `element`.
	///
	/// Every matching listener is called with the element as receiver and the
	/// event as its single argument. `once` listeners are removed before they
	/// run. Returns the number of listeners invoked.
	pub fn dispatch(element: &FakeValue, kind: &str) -> usize {
		let Some(Backing::Element(listeners)) = element.backing() else {
			return 0;
		};
		let matching: Vec<Registration> = {
			let mut listeners = listeners.borrow_mut();
			let matching = listeners
				.iter()
				.filter(|registration| registration.event == kind)
				.cloned()
				.collect();
			listeners.retain(|registration| registration.event != kind || !registration.once);
			matching
		};
		let event = Self::event(kind, element);
		for registration in &matching {
			registration
				.callback
				.invoke(element.clone(), vec![event.clone()]);
		}
		matching.len()
	}

	/// Returns the number of listeners registered for `kind` on `element`.
	pub fn listener_count(element: &FakeValue, kind: &str) -> usize {
		match element.backing() {
			Some(Backing::Element(listeners)) => listeners
				.borrow()
				.iter()
				.filter(|registration| registration.event == kind)
				.count(),
			_ => 0,
		}
	}
}

fn new_element(tag: &str) -> FakeValue {
	let element = FakeValue::with_backing(Backing::Element(RefCell::new(Vec::new())));
	element.set_property("tagName", tag.to_ascii_uppercase());
	element.set_property("id", "");
	element.set_property(
		"classList",
		FakeValue::with_backing(Backing::TokenList(RefCell::new(Vec::new()))),
	);
	element
}

pub(crate) fn document_call(
	elements: &RefCell<Vec<FakeValue>>,
	method: &str,
	args: &[FakeValue],
) -> Option<Result<FakeValue>> {
	let first = args.first().and_then(|value| value.as_string()).unwrap_or_default();
	match method {
		"getElementById" if first.is_empty() => Some(Ok(FakeValue::Null)),
		"getElementById" => {
			let found = elements
				.borrow()
				.iter()
				.find(|element| element.get("id").as_string().as_deref() == Some(first.as_str()))
				.cloned();
			Some(Ok(found.unwrap_or(FakeValue::Null)))
		}
		"createElement" => Some(Ok(new_element(&first))),
		_ => None,
	}
}
