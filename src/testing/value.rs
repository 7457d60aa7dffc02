//! In-memory implementation of [`ForeignValue`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{DomError, Result};
use crate::value::{ForeignValue, NativeCallable, ValueKind};

type Body = Box<dyn FnMut(FakeValue, Vec<FakeValue>) -> FakeValue>;

/// A dynamically typed value living in the fake host.
///
/// Objects and functions are reference counted: clones share the same
/// underlying host object, exactly like handles into a real JS heap.
#[derive(Clone, Default)]
pub enum FakeValue {
	/// `undefined`
	#[default]
	Undefined,
	/// `null`
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string.
	Str(Rc<str>),
	/// An object.
	Object(Rc<FakeObject>),
	/// A function.
	Function(Rc<FakeFunction>),
}

/// A fake host object.
pub struct FakeObject {
	properties: RefCell<HashMap<String, FakeValue>>,
	backing: Backing,
}

/// Built-in behavior of a fake object.
pub(crate) enum Backing {
	Plain,
	TokenList(RefCell<Vec<String>>),
	Element(RefCell<Vec<Registration>>),
	Document(RefCell<Vec<FakeValue>>),
}

#[derive(Clone)]
pub(crate) struct Registration {
	pub(crate) event: String,
	pub(crate) callback: FakeValue,
	pub(crate) capture: bool,
	pub(crate) once: bool,
}

/// A fake host function.
pub struct FakeFunction {
	body: RefCell<Option<Body>>,
	released: Cell<bool>,
}

impl FakeFunction {
	fn invoke(&self, this: FakeValue, args: Vec<FakeValue>) -> FakeValue {
		if self.released.get() {
			return FakeValue::Undefined;
		}
		// A function re-entered from its own body sees `undefined`, like the
		// browser callable.
		let Ok(mut body) = self.body.try_borrow_mut() else {
			crate::warn_log!("native callable re-entered while running, ignoring nested call");
			return FakeValue::Undefined;
		};
		match body.as_mut() {
			Some(f) => f(this, args),
			None => FakeValue::Undefined,
		}
	}

	fn release(&self) {
		self.released.set(true);
		if let Ok(mut body) = self.body.try_borrow_mut() {
			*body = None;
		}
	}
}

/// Native callable handed out by [`FakeValue::wrap`].
///
/// Dropping it marks the underlying function as released; a released
/// function returns `undefined` when the host invokes it.
pub struct FakeCallable {
	function: Rc<FakeFunction>,
}

impl NativeCallable<FakeValue> for FakeCallable {
	fn as_value(&self) -> FakeValue {
		FakeValue::Function(Rc::clone(&self.function))
	}
}

impl Drop for FakeCallable {
	fn drop(&mut self) {
		self.function.release();
	}
}

impl fmt::Debug for FakeCallable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FakeCallable")
			.field("released", &self.function.released.get())
			.finish()
	}
}

impl FakeValue {
	/// Creates an empty plain object.
	pub fn object() -> Self {
		Self::with_backing(Backing::Plain)
	}

	/// Returns `null`.
	pub fn null() -> Self {
		Self::Null
	}

	/// Creates a host function that is never released.
	pub fn function<F>(f: F) -> Self
	where
		F: FnMut(FakeValue, Vec<FakeValue>) -> FakeValue + 'static,
	{
		Self::Function(Rc::new(FakeFunction {
			body: RefCell::new(Some(Box::new(f))),
			released: Cell::new(false),
		}))
	}

	pub(crate) fn with_backing(backing: Backing) -> Self {
		Self::Object(Rc::new(FakeObject {
			properties: RefCell::new(HashMap::new()),
			backing,
		}))
	}

	pub(crate) fn backing(&self) -> Option<&Backing> {
		match self {
			Self::Object(object) => Some(&object.backing),
			_ => None,
		}
	}

	/// Sets a plain property on an object. Ignored for other kinds.
	pub fn set_property(&self, name: &str, value: impl Into<FakeValue>) {
		if let Self::Object(object) = self {
			object
				.properties
				.borrow_mut()
				.insert(name.to_string(), value.into());
		}
	}

	/// Removes a plain property from an object.
	pub fn delete_property(&self, name: &str) {
		if let Self::Object(object) = self {
			object.properties.borrow_mut().remove(name);
		}
	}

	/// Invokes a function value with an explicit receiver and arguments,
	/// the way the host's dispatch loop would.
	///
	/// Non-function values return `undefined`.
	pub fn invoke(&self, this: FakeValue, args: Vec<FakeValue>) -> FakeValue {
		match self {
			Self::Function(function) => function.invoke(this, args),
			_ => Self::Undefined,
		}
	}

	/// Returns `true` if this is a function whose native callable was dropped.
	pub fn is_released(&self) -> bool {
		matches!(self, Self::Function(function) if function.released.get())
	}

	fn builtin_get(&self, object: &FakeObject, property: &str) -> Option<FakeValue> {
		match (&object.backing, property) {
			(Backing::TokenList(tokens), "length") => {
				Some(FakeValue::Number(tokens.borrow().len() as f64))
			}
			(Backing::TokenList(tokens), "value") => Some(tokens.borrow().join(" ").into()),
			_ => None,
		}
	}

	fn builtin_call(
		&self,
		object: &FakeObject,
		method: &str,
		args: &[FakeValue],
	) -> Option<Result<FakeValue>> {
		match &object.backing {
			Backing::Plain => None,
			Backing::TokenList(tokens) => token_list_call(tokens, method, args),
			Backing::Element(listeners) => element_call(listeners, method, args),
			Backing::Document(elements) => super::document_call(elements, method, args),
		}
	}
}

fn arg(args: &[FakeValue], index: usize) -> FakeValue {
	args.get(index).cloned().unwrap_or_default()
}

fn token(method: &str, value: &FakeValue) -> Result<String> {
	let token = value.as_string().unwrap_or_else(|| value.to_string());
	if token.is_empty() {
		return Err(DomError::host(method, "SyntaxError: the token must not be empty"));
	}
	if token.chars().any(char::is_whitespace) {
		return Err(DomError::host(
			method,
			"InvalidCharacterError: the token must not contain whitespace",
		));
	}
	Ok(token)
}

fn token_list_call(
	tokens: &RefCell<Vec<String>>,
	method: &str,
	args: &[FakeValue],
) -> Option<Result<FakeValue>> {
	let result = match method {
		"contains" => {
			let name = arg(args, 0).as_string().unwrap_or_default();
			Ok(FakeValue::Bool(tokens.borrow().contains(&name)))
		}
		"add" => args
			.iter()
			.map(|value| token(method, value))
			.collect::<Result<Vec<_>>>()
			.map(|names| {
				let mut tokens = tokens.borrow_mut();
				for name in names {
					if !tokens.contains(&name) {
						tokens.push(name);
					}
				}
				FakeValue::Undefined
			}),
		"remove" => args
			.iter()
			.map(|value| token(method, value))
			.collect::<Result<Vec<_>>>()
			.map(|names| {
				tokens.borrow_mut().retain(|existing| !names.contains(existing));
				FakeValue::Undefined
			}),
		"toggle" => token(method, &arg(args, 0)).map(|name| {
			let mut tokens = tokens.borrow_mut();
			if tokens.contains(&name) {
				tokens.retain(|existing| *existing != name);
				FakeValue::Bool(false)
			} else {
				tokens.push(name);
				FakeValue::Bool(true)
			}
		}),
		_ => return None,
	};
	Some(result)
}

fn listener_flags(options: &FakeValue) -> (bool, bool) {
	match options {
		FakeValue::Bool(capture) => (*capture, false),
		FakeValue::Object(_) => (
			options.get("capture").is_truthy(),
			options.get("once").is_truthy(),
		),
		_ => (false, false),
	}
}

fn element_call(
	listeners: &RefCell<Vec<Registration>>,
	method: &str,
	args: &[FakeValue],
) -> Option<Result<FakeValue>> {
	match method {
		"addEventListener" | "removeEventListener" => {}
		_ => return None,
	}
	let event = arg(args, 0).as_string().unwrap_or_default();
	let callback = arg(args, 1);
	if !matches!(callback, FakeValue::Function(_)) {
		return Some(Ok(FakeValue::Undefined));
	}
	let (capture, once) = listener_flags(&arg(args, 2));
	let mut listeners = listeners.borrow_mut();
	let position = listeners.iter().position(|registration| {
		registration.event == event
			&& registration.capture == capture
			&& registration.callback.same_value(&callback)
	});
	match (method, position) {
		("addEventListener", None) => listeners.push(Registration {
			event,
			callback,
			capture,
			once,
		}),
		("removeEventListener", Some(index)) => {
			listeners.remove(index);
		}
		_ => {}
	}
	Some(Ok(FakeValue::Undefined))
}

impl ForeignValue for FakeValue {
	type Callable = FakeCallable;

	fn undefined() -> Self {
		Self::Undefined
	}

	fn from_string(value: &str) -> Self {
		Self::Str(Rc::from(value))
	}

	fn from_bool(value: bool) -> Self {
		Self::Bool(value)
	}

	fn new_object() -> Self {
		Self::object()
	}

	fn kind(&self) -> ValueKind {
		match self {
			Self::Undefined => ValueKind::Undefined,
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Boolean,
			Self::Number(_) => ValueKind::Number,
			Self::Str(_) => ValueKind::String,
			Self::Object(_) => ValueKind::Object,
			Self::Function(_) => ValueKind::Function,
		}
	}

	fn is_truthy(&self) -> bool {
		match self {
			Self::Undefined | Self::Null => false,
			Self::Bool(value) => *value,
			Self::Number(value) => *value != 0.0 && !value.is_nan(),
			Self::Str(value) => !value.is_empty(),
			Self::Object(_) | Self::Function(_) => true,
		}
	}

	fn get(&self, property: &str) -> Self {
		let Self::Object(object) = self else {
			return Self::Undefined;
		};
		if let Some(value) = self.builtin_get(object, property) {
			return value;
		}
		object
			.properties
			.borrow()
			.get(property)
			.cloned()
			.unwrap_or_default()
	}

	fn set(&self, property: &str, value: &Self) -> Result<()> {
		match self {
			Self::Object(_) => {
				self.set_property(property, value.clone());
				Ok(())
			}
			other => Err(DomError::host(
				property,
				format!("cannot set property on {}", other.kind()),
			)),
		}
	}

	fn call(&self, method: &str, args: &[Self]) -> Result<Self> {
		let Self::Object(object) = self else {
			return Err(DomError::host(method, "not a function"));
		};
		if let Some(result) = self.builtin_call(object, method, args) {
			return result;
		}
		match self.get(method) {
			function @ Self::Function(_) => Ok(function.invoke(self.clone(), args.to_vec())),
			_ => Err(DomError::host(method, "not a function")),
		}
	}

	fn as_string(&self) -> Option<String> {
		match self {
			Self::Str(value) => Some(value.to_string()),
			_ => None,
		}
	}

	fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}

	fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	fn same_value(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => {
				(a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
			}
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
			(Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}

	fn wrap<F>(f: F) -> Self::Callable
	where
		F: FnMut(Self, Vec<Self>) -> Self + 'static,
	{
		FakeCallable {
			function: Rc::new(FakeFunction {
				body: RefCell::new(Some(Box::new(f))),
				released: Cell::new(false),
			}),
		}
	}
}

/// Mirrors the host's `String(value)` conversion.
impl fmt::Display for FakeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Undefined => f.write_str("undefined"),
			Self::Null => f.write_str("null"),
			Self::Bool(value) => write!(f, "{}", value),
			Self::Number(value) => f.write_str(&crate::debug::format_number(*value)),
			Self::Str(value) => f.write_str(value),
			Self::Object(_) => f.write_str("[object Object]"),
			Self::Function(_) => f.write_str("function () { [native code] }"),
		}
	}
}

impl fmt::Debug for FakeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str(value) => write!(f, "{:?}", value),
			Self::Object(_) => f.write_str("FakeValue::Object"),
			Self::Function(_) => f.write_str("FakeValue::Function"),
			other => fmt::Display::fmt(other, f),
		}
	}
}

impl From<&str> for FakeValue {
	fn from(value: &str) -> Self {
		Self::Str(Rc::from(value))
	}
}

impl From<String> for FakeValue {
	fn from(value: String) -> Self {
		Self::Str(Rc::from(value))
	}
}

impl From<f64> for FakeValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<bool> for FakeValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
