//! Human-readable labels for foreign values.
//!
//! Used by the listener diagnostics and available to callers for their own
//! logging. Formatting only reads from the host and never fails.

use std::fmt;

use crate::class_list::ClassList;
use crate::value::{ForeignValue, ValueKind};

/// Returns a short label for `value`.
///
/// Objects render as `<obj[ id=..][ type=..][ cls=..]>`, each segment present
/// only when the attribute exists (and, for `id` and the class list, is
/// non-empty). Every other kind renders as its own textual form: strings
/// verbatim, `<undefined>`, `<null>`, `<function>`, or `<kind: text>` for
/// booleans and numbers.
///
/// # Example
///
/// ```
/// use reinhardt_dom::debug::describe;
/// use reinhardt_dom::testing::{FakeHost, FakeValue};
///
/// let host = FakeHost::new();
/// let element = host.insert_element("div", "foo");
/// FakeHost::set_classes(&element, &["bar"]);
///
/// assert_eq!(describe(&element), "<obj id=foo cls=bar>");
/// assert_eq!(describe(&FakeValue::from(42.0)), "<number: 42>");
/// ```
pub fn describe<V: ForeignValue>(value: &V) -> String {
	match value.kind() {
		ValueKind::Object => describe_object(value),
		_ => text(value),
	}
}

/// Lazily formats a value with [`describe`].
///
/// Handy in log macros, where the label is only built if the message is
/// actually emitted.
pub struct Describe<'a, V: ForeignValue>(pub &'a V);

impl<V: ForeignValue> fmt::Display for Describe<'_, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&describe(self.0))
	}
}

impl<V: ForeignValue> fmt::Debug for Describe<'_, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

fn describe_object<V: ForeignValue>(value: &V) -> String {
	let mut label = String::from("<obj");

	let id = value.get("id");
	if !id.is_undefined() {
		let id = text(&id);
		if !id.is_empty() {
			label.push_str(" id=");
			label.push_str(&id);
		}
	}

	let kind = value.get("type");
	if !kind.is_undefined() {
		label.push_str(" type=");
		label.push_str(&text(&kind));
	}

	let classes = ClassList::of(value).to_string();
	if !classes.is_empty() {
		label.push_str(" cls=");
		label.push_str(&classes);
	}

	label.push('>');
	label
}

/// The value's own textual form.
fn text<V: ForeignValue>(value: &V) -> String {
	match value.kind() {
		ValueKind::String => value.as_string().unwrap_or_default(),
		ValueKind::Boolean => match value.as_bool() {
			Some(flag) => format!("<boolean: {}>", flag),
			None => "<boolean>".to_string(),
		},
		ValueKind::Number => match value.as_f64() {
			Some(number) => format!("<number: {}>", format_number(number)),
			None => "<number>".to_string(),
		},
		kind => format!("<{}>", kind),
	}
}

/// Formats a number the way the host's `String(number)` does.
#[cfg(target_arch = "wasm32")]
pub(crate) fn format_number(number: f64) -> String {
	match js_sys::Number::from(number).to_string(10) {
		Ok(text) => String::from(text),
		Err(_) => number_to_string(number),
	}
}

/// Formats a number the way the host's `String(number)` does.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn format_number(number: f64) -> String {
	number_to_string(number)
}

/// ECMAScript `Number::toString` on top of the shortest round-trip digits
/// that `{:e}` produces.
fn number_to_string(number: f64) -> String {
	if number.is_nan() {
		return "NaN".to_string();
	}
	if number == 0.0 {
		return "0".to_string();
	}
	if number.is_infinite() {
		let sign = if number < 0.0 { "-" } else { "" };
		return format!("{}Infinity", sign);
	}

	let sign = if number < 0.0 { "-" } else { "" };
	let scientific = format!("{:e}", number.abs());
	let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
	let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
	let exponent: i32 = exponent.parse().unwrap_or(0);
	// Position of the decimal point relative to the start of `digits`.
	let point = exponent + 1;
	let count = digits.len() as i32;

	let body = if count <= point && point <= 21 {
		format!("{}{}", digits, "0".repeat((point - count) as usize))
	} else if 0 < point && point <= 21 {
		let (int, frac) = digits.split_at(point as usize);
		format!("{}.{}", int, frac)
	} else if -6 < point && point <= 0 {
		format!("0.{}{}", "0".repeat((-point) as usize), digits)
	} else {
		let (first, rest) = digits.split_at(1);
		let exp_sign = if point - 1 < 0 { '-' } else { '+' };
		let rest = if rest.is_empty() {
			String::new()
		} else {
			format!(".{}", rest)
		};
		format!("{}{}e{}{}", first, rest, exp_sign, (point - 1).abs())
	};
	format!("{}{}", sign, body)
}
