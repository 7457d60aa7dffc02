//! Foreign value bridge.
//!
//! Every host object this crate touches (the document, elements, events,
//! class lists) is reached through [`ForeignValue`]. The trait is the minimal
//! capability set needed by the rest of the crate: kind query, truthiness,
//! property access, method invocation and the creation of native callables.
//!
//! Two implementations exist:
//!
//! - [`wasm_bindgen::JsValue`] on `wasm32` targets (see [`js`]), backed by
//!   `js-sys` reflection.
//! - [`crate::testing::FakeValue`], an in-memory host used by native tests.

#[cfg(target_arch = "wasm32")]
pub mod js;

use std::fmt;

use crate::error::Result;

/// The runtime type of a foreign value, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// `undefined`
	Undefined,
	/// `null`
	Null,
	/// `true` / `false`
	Boolean,
	/// Any number, including `NaN` and the infinities.
	Number,
	/// A string.
	String,
	/// A symbol.
	Symbol,
	/// An arbitrary-precision integer.
	BigInt,
	/// Any non-callable object.
	Object,
	/// A callable object.
	Function,
}

impl ValueKind {
	/// Returns the host's `typeof`-style name for this kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Boolean => "boolean",
			Self::Number => "number",
			Self::String => "string",
			Self::Symbol => "symbol",
			Self::BigInt => "bigint",
			Self::Object => "object",
			Self::Function => "function",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An opaque handle to a dynamically typed value owned by the host.
///
/// Cloning a handle never copies the underlying host object; all clones refer
/// to the same live value.
pub trait ForeignValue: Clone + fmt::Debug + 'static {
	/// The native callable produced by [`ForeignValue::wrap`].
	type Callable: NativeCallable<Self>;

	/// Returns the host's `undefined` value.
	fn undefined() -> Self;

	/// Creates a host string.
	fn from_string(value: &str) -> Self;

	/// Creates a host boolean.
	fn from_bool(value: bool) -> Self;

	/// Creates an empty host object.
	fn new_object() -> Self;

	/// Returns the runtime kind of this value.
	fn kind(&self) -> ValueKind;

	/// Applies the host's boolean coercion rules.
	fn is_truthy(&self) -> bool;

	/// Reads a property.
	///
	/// Never fails: absent properties, and reads on values that cannot carry
	/// properties, yield `undefined`.
	fn get(&self, property: &str) -> Self;

	/// Writes a property.
	fn set(&self, property: &str, value: &Self) -> Result<()>;

	/// Invokes `self[method](...args)` with `self` as the receiver.
	fn call(&self, method: &str, args: &[Self]) -> Result<Self>;

	/// Returns the string content if this value is a string.
	fn as_string(&self) -> Option<String>;

	/// Returns the numeric content if this value is a number.
	fn as_f64(&self) -> Option<f64>;

	/// Returns the boolean content if this value is a boolean.
	fn as_bool(&self) -> Option<bool>;

	/// Host identity comparison (`Object.is`).
	fn same_value(&self, other: &Self) -> bool;

	/// Produces a native callable from Rust logic.
	///
	/// On every host invocation `f` receives the bound receiver (`this`) and
	/// the full argument list; its return value is handed back to the host.
	/// An invocation that arrives while `f` is already running (the handler
	/// synchronously re-dispatching its own event) does not reach `f` and
	/// yields `undefined`.
	fn wrap<F>(f: F) -> Self::Callable
	where
		F: FnMut(Self, Vec<Self>) -> Self + 'static;

	/// Returns `true` for `undefined`.
	fn is_undefined(&self) -> bool {
		self.kind() == ValueKind::Undefined
	}

	/// Returns `true` for `null`.
	fn is_null(&self) -> bool {
		self.kind() == ValueKind::Null
	}

	/// Returns `true` for non-callable objects.
	fn is_object(&self) -> bool {
		self.kind() == ValueKind::Object
	}
}

/// A host-invocable function produced from Rust logic.
///
/// The callable is the identity hosts use to match listener registrations, so
/// [`NativeCallable::as_value`] must return the same host function on every
/// call. Dropping the callable releases it on the host side.
pub trait NativeCallable<V: ForeignValue> {
	/// Returns the host function handle.
	fn as_value(&self) -> V;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ValueKind::Undefined, "undefined")]
	#[case(ValueKind::Null, "null")]
	#[case(ValueKind::Boolean, "boolean")]
	#[case(ValueKind::Number, "number")]
	#[case(ValueKind::String, "string")]
	#[case(ValueKind::Object, "object")]
	#[case(ValueKind::Function, "function")]
	fn test_value_kind_names(#[case] kind: ValueKind, #[case] expected: &str) {
		assert_eq!(kind.as_str(), expected);
		assert_eq!(kind.to_string(), expected);
	}
}
