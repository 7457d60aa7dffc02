//! Event listeners with stable identity.
//!
//! Hosts match `removeEventListener` calls by *callable identity*, not by
//! event name or handler equality. [`EventListener`] therefore creates its
//! native callable exactly once and owns it for its whole lifetime: the same
//! instance that attached a handler is the only thing that can detach it.
//!
//! Every invocation coming from the host is validated before it reaches the
//! handler. Malformed invocations (no receiver, wrong arity, missing event)
//! are logged and answered with `undefined`, so a bad call never unwinds into
//! the host's dispatch loop.
//!
//! ## Example
//!
//! ```
//! use reinhardt_dom::testing::{FakeHost, FakeValue};
//! use reinhardt_dom::{EventListener, ForeignValue, ListenerState};
//!
//! let host = FakeHost::new();
//! let button = host.insert_element("button", "save");
//!
//! let listener = EventListener::new("click", |_subject: FakeValue, _event: FakeValue| {
//!     FakeValue::undefined()
//! });
//! listener.attach(&button).unwrap();
//! assert_eq!(listener.state(), ListenerState::Attached);
//!
//! listener.detach(&button).unwrap();
//! assert_eq!(FakeHost::listener_count(&button, "click"), 0);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::debug::Describe;
use crate::error::Result;
use crate::value::{ForeignValue, NativeCallable};

/// Lifecycle of an [`EventListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
	/// Created, never attached.
	Unbound,
	/// Registered on at least one target.
	Attached,
	/// Was attached, and has since been removed from every target.
	Detached,
}

/// Options passed to `addEventListener`.
///
/// With the defaults the host receives only the event name and the callable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
	/// Listen during the capture phase.
	pub capture: bool,
	/// Let the host remove the listener after its first invocation.
	///
	/// The listener forgets the target as soon as that invocation arrives,
	/// so its state follows the host's registration.
	pub once: bool,
	/// Promise the host that the handler never calls `preventDefault`.
	pub passive: bool,
}

impl ListenerOptions {
	/// Creates the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the capture option.
	pub fn capture(mut self, capture: bool) -> Self {
		self.capture = capture;
		self
	}

	/// Sets the once option.
	pub fn once(mut self, once: bool) -> Self {
		self.once = once;
		self
	}

	/// Sets the passive option.
	pub fn passive(mut self, passive: bool) -> Self {
		self.passive = passive;
		self
	}

	/// Returns `true` if every option has its default value.
	pub fn is_default(&self) -> bool {
		*self == Self::default()
	}

	fn to_value<V: ForeignValue>(self) -> Result<Option<V>> {
		if self.is_default() {
			return Ok(None);
		}
		let options = V::new_object();
		options.set("capture", &V::from_bool(self.capture))?;
		options.set("once", &V::from_bool(self.once))?;
		options.set("passive", &V::from_bool(self.passive))?;
		Ok(Some(options))
	}
}

/// Why a host invocation was rejected before reaching the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum InvocationShape {
	#[error("subject is not truthy")]
	FalsySubject,
	#[error("received {0} arguments, expected exactly 1")]
	ArgumentCount(usize),
	#[error("event argument is not truthy")]
	FalsyEvent,
}

/// Checks the receiver and arguments of a host invocation, returning the
/// event on success.
pub(crate) fn check_invocation<V: ForeignValue>(
	subject: &V,
	args: Vec<V>,
) -> std::result::Result<V, InvocationShape> {
	if !subject.is_truthy() {
		return Err(InvocationShape::FalsySubject);
	}
	let [event] = <[V; 1]>::try_from(args)
		.map_err(|args| InvocationShape::ArgumentCount(args.len()))?;
	if !event.is_truthy() {
		return Err(InvocationShape::FalsyEvent);
	}
	Ok(event)
}

/// Targets a listener is registered on, shared with its native callable.
struct Registry<V> {
	targets: RefCell<Vec<V>>,
	state: Cell<ListenerState>,
}

impl<V: ForeignValue> Registry<V> {
	fn remember(&self, target: &V) {
		let mut targets = self.targets.borrow_mut();
		if !targets.iter().any(|attached| attached.same_value(target)) {
			targets.push(target.clone());
		}
		self.state.set(ListenerState::Attached);
	}

	fn forget(&self, target: &V) {
		let mut targets = self.targets.borrow_mut();
		let before = targets.len();
		targets.retain(|attached| !attached.same_value(target));
		if before != targets.len() && targets.is_empty() {
			self.state.set(ListenerState::Detached);
		}
	}
}

/// A handler bound to an event name through a single native callable.
pub struct EventListener<V: ForeignValue> {
	event: String,
	options: ListenerOptions,
	callable: V::Callable,
	registry: Rc<Registry<V>>,
}

impl<V: ForeignValue> EventListener<V> {
	/// Creates a listener for `event` with default options.
	///
	/// `handler` receives the subject the host bound the call to (the element
	/// the listener is attached to) and the event; its return value is handed
	/// back to the host.
	pub fn new<F>(event: impl Into<String>, handler: F) -> Self
	where
		F: FnMut(V, V) -> V + 'static,
	{
		Self::with_options(event, ListenerOptions::default(), handler)
	}

	/// Creates a listener for `event` with explicit options.
	pub fn with_options<F>(event: impl Into<String>, options: ListenerOptions, mut handler: F) -> Self
	where
		F: FnMut(V, V) -> V + 'static,
	{
		let event = event.into();
		let name = event.clone();
		let registry = Rc::new(Registry {
			targets: RefCell::new(Vec::new()),
			state: Cell::new(ListenerState::Unbound),
		});
		let shared = options.once.then(|| Rc::clone(&registry));
		let callable = V::wrap(move |subject: V, args: Vec<V>| {
			let incoming = match check_invocation(&subject, args) {
				Ok(incoming) => incoming,
				Err(shape) => {
					crate::warn_log!("event {:?} {}", name, shape);
					return V::undefined();
				}
			};
			crate::debug_log!(
				"Event {:?} called on {} evt={} target={}",
				name,
				Describe(&subject),
				Describe(&incoming),
				Describe(&incoming.get("target"))
			);
			// The host has already dropped a `once` registration.
			if let Some(registry) = &shared {
				registry.forget(&subject);
			}
			handler(subject, incoming)
		});

		Self {
			event,
			options,
			callable,
			registry,
		}
	}

	/// Returns the event name.
	pub fn event(&self) -> &str {
		&self.event
	}

	/// Returns the registration options.
	pub fn options(&self) -> ListenerOptions {
		self.options
	}

	/// Returns the current lifecycle state.
	pub fn state(&self) -> ListenerState {
		self.registry.state.get()
	}

	/// Returns the host function registered by this listener.
	pub fn callable(&self) -> V {
		self.callable.as_value()
	}

	/// Returns `true` if this listener is currently attached to `target`.
	pub fn is_attached_to(&self, target: &V) -> bool {
		self.registry
			.targets
			.borrow()
			.iter()
			.any(|attached| attached.same_value(target))
	}

	/// Returns the number of targets this listener is attached to.
	pub fn attached_count(&self) -> usize {
		self.registry.targets.borrow().len()
	}

	/// Registers the listener on `target`.
	///
	/// Attaching to several targets is allowed; each one must be detached
	/// separately.
	///
	/// # Errors
	///
	/// Returns [`crate::DomError::Host`] if `target` cannot take listeners.
	pub fn attach(&self, target: &V) -> Result<()> {
		crate::debug_log!(
			"Adding event listener {:?} to {}",
			self.event,
			Describe(target)
		);
		let mut args = vec![V::from_string(&self.event), self.callable.as_value()];
		if let Some(options) = self.options.to_value::<V>()? {
			args.push(options);
		}
		target.call("addEventListener", &args)?;
		self.registry.remember(target);
		Ok(())
	}

	/// Removes the listener from `target`.
	///
	/// Detaching from a target the listener was never attached to is a no-op.
	///
	/// # Errors
	///
	/// Returns [`crate::DomError::Host`] if `target` cannot take listeners.
	pub fn detach(&self, target: &V) -> Result<()> {
		self.unregister(target)?;
		self.registry.forget(target);
		Ok(())
	}

	/// Attaches to `target` for the lifetime of the returned guard.
	///
	/// # Errors
	///
	/// Returns [`crate::DomError::Host`] if `target` cannot take listeners.
	pub fn attach_scoped(&self, target: &V) -> Result<Attachment<'_, V>> {
		self.attach(target)?;
		Ok(Attachment {
			listener: self,
			target: target.clone(),
		})
	}

	/// Detaches from every remaining target and releases the native callable.
	pub fn release(self) {
		drop(self);
	}

	fn unregister(&self, target: &V) -> Result<()> {
		crate::debug_log!(
			"Removing event listener {:?} from {}",
			self.event,
			Describe(target)
		);
		let mut args = vec![V::from_string(&self.event), self.callable.as_value()];
		if self.options.capture {
			args.push(V::from_bool(true));
		}
		target.call("removeEventListener", &args)?;
		Ok(())
	}
}

impl<V: ForeignValue> Drop for EventListener<V> {
	fn drop(&mut self) {
		let targets = self.registry.targets.take();
		for target in &targets {
			if let Err(err) = self.unregister(target) {
				crate::error_log!(
					"failed to detach {:?} listener from {} on drop: {}",
					self.event,
					Describe(target),
					err
				);
			}
		}
	}
}

impl<V: ForeignValue> fmt::Debug for EventListener<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventListener")
			.field("event", &self.event)
			.field("options", &self.options)
			.field("state", &self.state())
			.field("targets", &self.attached_count())
			.finish()
	}
}

/// Guard returned by [`EventListener::attach_scoped`].
///
/// Detaches the listener from its target when dropped.
pub struct Attachment<'a, V: ForeignValue> {
	listener: &'a EventListener<V>,
	target: V,
}

impl<V: ForeignValue> Attachment<'_, V> {
	/// Returns the target the listener is attached to.
	pub fn target(&self) -> &V {
		&self.target
	}
}

impl<V: ForeignValue> Drop for Attachment<'_, V> {
	fn drop(&mut self) {
		if let Err(err) = self.listener.detach(&self.target) {
			crate::error_log!(
				"failed to detach scoped {:?} listener from {}: {}",
				self.listener.event,
				Describe(&self.target),
				err
			);
		}
	}
}

impl<V: ForeignValue> fmt::Debug for Attachment<'_, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Attachment")
			.field("event", &self.listener.event)
			.field("target", &Describe(&self.target))
			.finish()
	}
}
