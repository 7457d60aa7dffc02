//! CSS class list access.
//!
//! [`ClassList`] is a live view over an element's `classList`. Elements
//! without a class list, or whose class list is empty, produce an
//! *unavailable* view on which every operation is a safe no-op.

use std::fmt;

use crate::value::{ForeignValue, ValueKind};

/// A view over the class-membership set of one element.
///
/// The view does not copy anything: mutations go straight to the host
/// structure and are visible to every other holder of the same element.
#[derive(Debug, Clone)]
pub struct ClassList<V: ForeignValue> {
	list: Option<V>,
}

impl<V: ForeignValue> ClassList<V> {
	/// Resolves the class list of `element`.
	///
	/// The view is unavailable when `classList` is undefined, or when its
	/// reported `length` is not a positive number. An empty class list is
	/// treated the same as a missing one.
	pub fn of(element: &V) -> Self {
		let list = element.get("classList");
		if list.is_undefined() {
			return Self::unavailable();
		}
		let length = list.get("length");
		match length.as_f64() {
			Some(n) if length.kind() == ValueKind::Number && n >= 1.0 => Self { list: Some(list) },
			_ => Self::unavailable(),
		}
	}

	/// Returns a view in the unavailable state.
	pub fn unavailable() -> Self {
		Self { list: None }
	}

	/// Returns `true` if the view is backed by a host class list.
	pub fn is_available(&self) -> bool {
		self.list.is_some()
	}

	/// Returns `true` if the class list contains `name`.
	pub fn contains(&self, name: &str) -> bool {
		let Some(list) = &self.list else {
			return false;
		};
		list.call("contains", &[V::from_string(name)])
			.ok()
			.and_then(|found| found.as_bool())
			.unwrap_or(false)
	}

	/// Adds `name` to the class list.
	pub fn add(&self, name: &str) {
		self.mutate("add", name);
	}

	/// Removes `name` from the class list.
	pub fn remove(&self, name: &str) {
		self.mutate("remove", name);
	}

	/// Toggles `name`, returning whether it is present afterwards.
	pub fn toggle(&self, name: &str) -> bool {
		let Some(list) = &self.list else {
			return false;
		};
		match list.call("toggle", &[V::from_string(name)]) {
			Ok(present) => present.as_bool().unwrap_or(false),
			Err(err) => {
				crate::warn_log!("classList.toggle({:?}) failed: {}", name, err);
				false
			}
		}
	}

	/// Returns the number of classes, or `0` when unavailable.
	pub fn len(&self) -> usize {
		self.list
			.as_ref()
			.and_then(|list| list.get("length").as_f64())
			.filter(|n| *n >= 1.0)
			.map(|n| n as usize)
			.unwrap_or(0)
	}

	/// Returns `true` if no classes are visible through this view.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the class names in the order the host reports them.
	pub fn names(&self) -> Vec<String> {
		self.value()
			.split_whitespace()
			.map(str::to_string)
			.collect()
	}

	fn value(&self) -> String {
		self.list
			.as_ref()
			.and_then(|list| list.get("value").as_string())
			.unwrap_or_default()
	}

	fn mutate(&self, method: &str, name: &str) {
		let Some(list) = &self.list else {
			return;
		};
		if let Err(err) = list.call(method, &[V::from_string(name)]) {
			crate::warn_log!("classList.{}({:?}) failed: {}", method, name, err);
		}
	}
}

/// Renders the canonical space-joined class value; empty when unavailable.
impl<V: ForeignValue> fmt::Display for ClassList<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.value())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeHost, FakeValue};
	use rstest::rstest;

	#[rstest]
	fn test_missing_class_list_is_unavailable() {
		let plain = FakeValue::object();
		let list = ClassList::of(&plain);

		assert!(!list.is_available());
		assert!(!list.contains("anything"));
		assert_eq!(list.to_string(), "");
		assert_eq!(list.len(), 0);
		list.add("x");
		list.remove("x");
		assert!(!list.toggle("x"));
		assert!(!list.contains("x"));
	}

	#[rstest]
	fn test_empty_class_list_is_unavailable() {
		let host = FakeHost::new();
		let element = host.create_element("div");
		let list = ClassList::of(&element);

		assert!(!list.is_available());
		list.add("ignored");
		assert!(!ClassList::of(&element).is_available());
	}

	#[rstest]
	fn test_non_numeric_length_is_unavailable() {
		let element = FakeValue::object();
		let fake_list = FakeValue::object();
		fake_list.set_property("length", FakeValue::from("3"));
		element.set_property("classList", fake_list);

		assert!(!ClassList::of(&element).is_available());
	}

	#[rstest]
	fn test_available_list_operations() {
		let host = FakeHost::new();
		let element = host.create_element("div");
		FakeHost::set_classes(&element, &["a", "b"]);
		let list = ClassList::of(&element);

		assert!(list.is_available());
		assert!(list.contains("a"));
		assert!(!list.contains("c"));
		assert_eq!(list.to_string(), "a b");
		assert_eq!(list.names(), vec!["a", "b"]);

		list.add("c");
		list.remove("a");
		assert_eq!(list.to_string(), "b c");
		assert_eq!(list.len(), 2);

		assert!(!list.toggle("b"));
		assert!(list.toggle("d"));
		assert_eq!(list.to_string(), "c d");
	}

	#[rstest]
	fn test_mutation_is_visible_through_other_views() {
		let host = FakeHost::new();
		let element = host.create_element("span");
		FakeHost::set_classes(&element, &["base"]);

		ClassList::of(&element).add("active");

		assert!(ClassList::of(&element).contains("active"));
	}
}
