//! Browser backend for [`ForeignValue`].
//!
//! Values are plain [`JsValue`]s. Property access and method calls go through
//! `js_sys::Reflect` so that a missing property or a throwing getter never
//! aborts the WASM instance.

use std::cell::RefCell;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{ForeignValue, NativeCallable, ValueKind};
use crate::error::{DomError, Result};

/// Host-side shim that forwards the receiver and the arguments to Rust.
///
/// A closure exported by wasm-bindgen cannot observe `this`, and its arity is
/// fixed at compile time; the shim turns both into ordinary arguments. Strict
/// mode keeps an `undefined` or `null` receiver as is instead of replacing it
/// with the global object.
const SHIM_BODY: &str = "\"use strict\"; \
	return function() { return inner(this, Array.prototype.slice.call(arguments)); };";

thread_local! {
	static SHIM_FACTORY: RefCell<Option<Option<Function>>> = const { RefCell::new(None) };
}

/// Returns the compiled shim factory, or `None` when the host refuses to
/// compile code at runtime (for example under a strict CSP).
fn shim_factory() -> Option<Function> {
	SHIM_FACTORY.with(|cell| {
		cell.borrow_mut()
			.get_or_insert_with(|| match compile_shim_factory() {
				Ok(factory) => Some(factory),
				Err(err) => {
					crate::error_log!(
						"cannot compile listener shim ({}), falling back to currentTarget",
						describe_error(&err)
					);
					None
				}
			})
			.clone()
	})
}

fn compile_shim_factory() -> std::result::Result<Function, JsValue> {
	let constructor: Function =
		Reflect::get(&js_sys::global(), &JsValue::from_str("Function"))?.dyn_into()?;
	let args = Array::of2(&JsValue::from_str("inner"), &JsValue::from_str(SHIM_BODY));
	Reflect::construct(&constructor, &args)?.dyn_into()
}

fn describe_error(err: &JsValue) -> String {
	if let Some(message) = err.as_string() {
		return message;
	}
	Reflect::get(err, &JsValue::from_str("message"))
		.ok()
		.and_then(|message| message.as_string())
		.unwrap_or_else(|| "unknown host error".to_string())
}

/// A Rust closure exposed to the browser as a function.
///
/// Owns the wasm-bindgen [`Closure`]; dropping a `JsCallable` invalidates the
/// function on the host side.
pub struct JsCallable {
	function: Function,
	_closure: Closure<dyn Fn(JsValue, JsValue) -> JsValue>,
}

impl NativeCallable<JsValue> for JsCallable {
	fn as_value(&self) -> JsValue {
		self.function.clone().into()
	}
}

impl std::fmt::Debug for JsCallable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JsCallable")
			.field("function", &"<function>")
			.finish()
	}
}

impl ForeignValue for JsValue {
	type Callable = JsCallable;

	fn undefined() -> Self {
		JsValue::UNDEFINED
	}

	fn from_string(value: &str) -> Self {
		JsValue::from_str(value)
	}

	fn from_bool(value: bool) -> Self {
		JsValue::from_bool(value)
	}

	fn new_object() -> Self {
		Object::new().into()
	}

	fn kind(&self) -> ValueKind {
		if self.is_null() {
			return ValueKind::Null;
		}
		match self.js_typeof().as_string().as_deref() {
			Some("undefined") => ValueKind::Undefined,
			Some("boolean") => ValueKind::Boolean,
			Some("number") => ValueKind::Number,
			Some("string") => ValueKind::String,
			Some("symbol") => ValueKind::Symbol,
			Some("bigint") => ValueKind::BigInt,
			Some("function") => ValueKind::Function,
			_ => ValueKind::Object,
		}
	}

	fn is_truthy(&self) -> bool {
		JsValue::is_truthy(self)
	}

	fn get(&self, property: &str) -> Self {
		if !matches!(self.kind(), ValueKind::Object | ValueKind::Function) {
			return JsValue::UNDEFINED;
		}
		Reflect::get(self, &JsValue::from_str(property)).unwrap_or(JsValue::UNDEFINED)
	}

	fn set(&self, property: &str, value: &Self) -> Result<()> {
		match Reflect::set(self, &JsValue::from_str(property), value) {
			Ok(true) => Ok(()),
			Ok(false) => Err(DomError::host(property, "property is read-only")),
			Err(err) => Err(DomError::host(property, describe_error(&err))),
		}
	}

	fn call(&self, method: &str, args: &[Self]) -> Result<Self> {
		let function = ForeignValue::get(self, method)
			.dyn_into::<Function>()
			.map_err(|_| DomError::host(method, "not a function"))?;
		let args: Array = args.iter().collect();
		function
			.apply(self, &args)
			.map_err(|err| DomError::host(method, describe_error(&err)))
	}

	fn as_string(&self) -> Option<String> {
		JsValue::as_string(self)
	}

	fn as_f64(&self) -> Option<f64> {
		JsValue::as_f64(self)
	}

	fn as_bool(&self) -> Option<bool> {
		JsValue::as_bool(self)
	}

	fn same_value(&self, other: &Self) -> bool {
		Object::is(self, other)
	}

	fn wrap<F>(f: F) -> Self::Callable
	where
		F: FnMut(Self, Vec<Self>) -> Self + 'static,
	{
		// `Fn` closures may be re-entered by the host (a handler dispatching
		// its own event); the handler itself is not, so nested calls are
		// answered with `undefined`.
		let handler = RefCell::new(f);
		let closure = Closure::wrap(Box::new(move |this: JsValue, args: JsValue| {
			let Ok(mut f) = handler.try_borrow_mut() else {
				crate::warn_log!("native callable re-entered while running, ignoring nested call");
				return JsValue::UNDEFINED;
			};
			match args.dyn_into::<Array>() {
				Ok(args) => (*f)(this, args.iter().collect()),
				// Called directly by the host: the first parameter is the event.
				Err(_) => {
					let subject = ForeignValue::get(&this, "currentTarget");
					(*f)(subject, vec![this])
				}
			}
		}) as Box<dyn Fn(JsValue, JsValue) -> JsValue>);

		let function = shim_factory()
			.and_then(|factory| factory.call1(&JsValue::UNDEFINED, closure.as_ref()).ok())
			.and_then(|shim| shim.dyn_into::<Function>().ok())
			.unwrap_or_else(|| closure.as_ref().unchecked_ref::<Function>().clone());

		JsCallable {
			function,
			_closure: closure,
		}
	}
}
