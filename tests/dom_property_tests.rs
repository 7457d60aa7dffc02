//! Property-based tests for DOM access
//!
//! Uses proptest to verify properties that should hold for all inputs.

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use proptest::prelude::*;
	use proptest::proptest;
	use reinhardt_dom::testing::{FakeHost, FakeValue};
	use reinhardt_dom::{ClassList, Document, DomError, EventListener, ForeignValue, describe};

	proptest! {
		/// Property: looking up an id that was never inserted is always NotFound carrying the id
		#[test]
		fn prop_unknown_id_is_not_found(id in ".{0,40}") {
			let host = FakeHost::new();
			let document = Document::acquire(host.global()).unwrap();

			let err = document.get_element_by_id(&id).unwrap_err();

			prop_assert_eq!(err, DomError::NotFound(id));
		}

		/// Property: an inserted id always resolves to the inserted element
		#[test]
		fn prop_inserted_id_resolves(id in "[a-zA-Z][a-zA-Z0-9_-]{0,30}") {
			let host = FakeHost::new();
			let element = host.insert_element("div", &id);
			let document = Document::acquire(host.global()).unwrap();

			let found = document.get_element_by_id(&id).unwrap();

			prop_assert!(found.same_value(&element));
		}

		/// Property: a view without a class list never reports membership
		#[test]
		fn prop_absent_class_list_contains_nothing(name in ".{0,20}") {
			let classes = ClassList::of(&FakeValue::object());

			classes.add(&name);

			prop_assert!(!classes.is_available());
			prop_assert!(!classes.contains(&name));
		}

		/// Property: adding a class is idempotent
		#[test]
		fn prop_add_is_idempotent(
			initial in prop::collection::vec("[a-z]{1,8}", 1..5),
			name in "[a-z]{1,8}",
		) {
			let host = FakeHost::new();
			let element = host.create_element("div");
			let initial: Vec<&str> = initial.iter().map(String::as_str).collect();
			FakeHost::set_classes(&element, &initial);
			let classes = ClassList::of(&element);

			classes.add(&name);
			let once = classes.to_string();
			classes.add(&name);

			prop_assert!(classes.contains(&name));
			prop_assert_eq!(classes.to_string(), once);
		}

		/// Property: describe never panics and labels every object with the obj prefix
		#[test]
		fn prop_describe_object_prefix(id in ".{0,20}", kind in ".{0,20}") {
			let object = FakeValue::object();
			object.set_property("id", id.as_str());
			object.set_property("type", kind.as_str());

			let label = describe(&object);

			prop_assert!(label.starts_with("<obj"));
			prop_assert!(label.ends_with('>'));
		}

		/// Property: describe renders strings verbatim
		#[test]
		fn prop_describe_string_is_verbatim(text in ".{0,40}") {
			prop_assert_eq!(describe(&FakeValue::from(text.as_str())), text);
		}

		/// Property: any invocation that is not exactly one truthy event never reaches the handler
		#[test]
		fn prop_wrong_arity_never_reaches_handler(count in 0usize..6) {
			prop_assume!(count != 1);
			let calls = Rc::new(Cell::new(0));
			let counter = Rc::clone(&calls);
			let listener = EventListener::new("click", move |_: FakeValue, _: FakeValue| {
				counter.set(counter.get() + 1);
				FakeValue::Undefined
			});
			let args = (0..count).map(|_| FakeValue::object()).collect();

			let result = listener.callable().invoke(FakeValue::object(), args);

			prop_assert!(result.is_undefined());
			prop_assert_eq!(calls.get(), 0);
		}
	}
}
