//! Browser tests for the `JsValue` backend
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use reinhardt_dom::{
	ClassList, Document, DomError, EventListener, ForeignValue, ListenerState, ValueKind, describe,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Inserts a fresh element into `<body>` and returns it.
fn mount(tag: &str, id: &str, classes: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let element = document.create_element(tag).unwrap();
	element.set_id(id);
	if !classes.is_empty() {
		element.set_class_name(classes);
	}
	document.body().unwrap().append_child(&element).unwrap();
	element
}

fn click(target: &JsValue) {
	let event = web_sys::Event::new("click").unwrap();
	target
		.unchecked_ref::<web_sys::EventTarget>()
		.dispatch_event(&event)
		.unwrap();
}

#[wasm_bindgen_test]
fn test_value_kinds() {
	assert_eq!(JsValue::UNDEFINED.kind(), ValueKind::Undefined);
	assert_eq!(JsValue::NULL.kind(), ValueKind::Null);
	assert_eq!(JsValue::from(true).kind(), ValueKind::Boolean);
	assert_eq!(JsValue::from(1.5).kind(), ValueKind::Number);
	assert_eq!(JsValue::from_str("x").kind(), ValueKind::String);
	assert_eq!(js_sys::Object::new().kind(), ValueKind::Object);
	assert_eq!(
		JsValue::from(js_sys::Function::new_no_args("")).kind(),
		ValueKind::Function
	);
}

#[wasm_bindgen_test]
fn test_property_read_on_primitive_is_undefined() {
	assert!(JsValue::NULL.get("id").is_undefined());
	assert!(JsValue::from(3).get("length").is_undefined());
}

#[wasm_bindgen_test]
fn test_document_lookup() {
	let element = mount("div", "wasm-lookup", "");
	let document = Document::from_window().unwrap();

	let found = document.get_element_by_id("wasm-lookup").unwrap();
	let missing = document.get_element_by_id("wasm-missing").unwrap_err();

	assert!(found.same_value(&element.into()));
	assert_eq!(missing, DomError::NotFound("wasm-missing".to_string()));
}

#[wasm_bindgen_test]
fn test_create_element() {
	let document = Document::from_window().unwrap();

	let element = document.create_element("section");

	assert_eq!(element.get("tagName").as_string().as_deref(), Some("SECTION"));
}

#[wasm_bindgen_test]
fn test_class_list() {
	let element: JsValue = mount("div", "wasm-classes", "a b").into();
	let classes = ClassList::of(&element);

	assert!(classes.is_available());
	classes.add("c");
	classes.remove("a");
	assert_eq!(classes.to_string(), "b c");
	assert!(classes.toggle("d"));

	let bare: JsValue = mount("div", "wasm-bare", "").into();
	assert!(!ClassList::of(&bare).is_available());
}

#[wasm_bindgen_test]
fn test_describe_element() {
	let element: JsValue = mount("input", "wasm-describe", "field").into();
	element
		.set("type", &JsValue::from_str("checkbox"))
		.unwrap();

	assert_eq!(
		describe(&element),
		"<obj id=wasm-describe type=checkbox cls=field>"
	);
	assert_eq!(describe(&JsValue::from(42)), "<number: 42>");
	assert_eq!(describe(&JsValue::NULL), "<null>");
}

#[wasm_bindgen_test]
fn test_listener_receives_subject_and_event() {
	let element: JsValue = mount("button", "wasm-listener", "").into();
	let calls: Rc<RefCell<Vec<(JsValue, JsValue)>>> = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&calls);
	let listener = EventListener::new("click", move |subject: JsValue, event: JsValue| {
		sink.borrow_mut().push((subject, event));
		JsValue::UNDEFINED
	});

	listener.attach(&element).unwrap();
	click(&element);

	let calls = calls.borrow();
	assert_eq!(calls.len(), 1);
	assert!(calls[0].0.same_value(&element));
	assert_eq!(
		calls[0].1.get("type").as_string().as_deref(),
		Some("click")
	);
}

#[wasm_bindgen_test]
fn test_listener_detach_by_identity() {
	let element: JsValue = mount("button", "wasm-detach", "").into();
	let count = Rc::new(RefCell::new(0));
	let counter = Rc::clone(&count);
	let listener = EventListener::new("click", move |_: JsValue, _: JsValue| {
		*counter.borrow_mut() += 1;
		JsValue::UNDEFINED
	});
	let impostor = EventListener::new("click", |_: JsValue, _: JsValue| JsValue::UNDEFINED);

	listener.attach(&element).unwrap();
	impostor.detach(&element).unwrap();
	click(&element);
	assert_eq!(*count.borrow(), 1);

	listener.detach(&element).unwrap();
	click(&element);
	assert_eq!(*count.borrow(), 1);
	assert_eq!(listener.state(), ListenerState::Detached);
}

#[wasm_bindgen_test]
fn test_malformed_invocation_is_contained() {
	let count = Rc::new(RefCell::new(0));
	let counter = Rc::clone(&count);
	let listener = EventListener::new("click", move |_: JsValue, _: JsValue| {
		*counter.borrow_mut() += 1;
		JsValue::UNDEFINED
	});
	let function: js_sys::Function = listener.callable().unchecked_into();

	let result = function.call0(&JsValue::NULL).unwrap();

	assert!(result.is_undefined());
	assert_eq!(*count.borrow(), 0);
}

#[wasm_bindgen_test]
fn test_falsy_receiver_with_event_is_rejected() {
	let count = Rc::new(RefCell::new(0));
	let counter = Rc::clone(&count);
	let listener = EventListener::new("click", move |_: JsValue, _: JsValue| {
		*counter.borrow_mut() += 1;
		JsValue::UNDEFINED
	});
	let function: js_sys::Function = listener.callable().unchecked_into();
	let event: JsValue = web_sys::Event::new("click").unwrap().into();

	let from_undefined = function.call1(&JsValue::UNDEFINED, &event).unwrap();
	let from_null = function.call1(&JsValue::NULL, &event).unwrap();

	assert!(from_undefined.is_undefined());
	assert!(from_null.is_undefined());
	assert_eq!(*count.borrow(), 0);
}

#[wasm_bindgen_test]
fn test_handler_redispatching_its_own_event() {
	let element: JsValue = mount("button", "wasm-reenter", "").into();
	let count = Rc::new(RefCell::new(0));
	let counter = Rc::clone(&count);
	let nested: Rc<RefCell<Vec<Result<JsValue, JsValue>>>> = Rc::new(RefCell::new(Vec::new()));
	let nested_sink = Rc::clone(&nested);
	let slot: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));
	let inner = Rc::clone(&slot);
	let listener = EventListener::new("click", move |subject: JsValue, event: JsValue| {
		*counter.borrow_mut() += 1;
		if let Some(function) = inner.borrow().as_ref() {
			nested_sink.borrow_mut().push(function.call1(&subject, &event));
		}
		subject.unchecked_ref::<web_sys::HtmlElement>().click();
		JsValue::UNDEFINED
	});
	*slot.borrow_mut() = Some(listener.callable().unchecked_into());
	listener.attach(&element).unwrap();

	click(&element);

	assert_eq!(*count.borrow(), 1);
	let nested = nested.borrow();
	assert_eq!(nested.len(), 1);
	assert!(matches!(&nested[0], Ok(value) if value.is_undefined()));
	slot.borrow_mut().take();
}
