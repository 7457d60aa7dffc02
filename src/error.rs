//! Error types for DOM access.
//!
//! Only boundary-facing operations (document acquisition, element lookup,
//! listener registration) return errors. Problems detected while the host is
//! dispatching an event are logged and contained inside the listener, so they
//! never appear here.

/// Errors surfaced to callers of this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The host does not expose the expected capability (usually the document).
	#[error("cannot get {0}: not running inside a compatible host")]
	Environment(String),
	/// No element with the given id exists in the document.
	#[error("cannot find element with id {0:?}")]
	NotFound(String),
	/// The host threw, or the requested method is not callable.
	#[error("host call to {method:?} failed: {message}")]
	Host {
		/// The method or property being invoked.
		method: String,
		/// The host-provided description of the failure.
		message: String,
	},
}

impl DomError {
	/// Creates a [`DomError::Host`] for the given method.
	pub fn host(method: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Host {
			method: method.into(),
			message: message.into(),
		}
	}

	/// Returns the element id for [`DomError::NotFound`].
	pub fn missing_id(&self) -> Option<&str> {
		match self {
			Self::NotFound(id) => Some(id),
			_ => None,
		}
	}
}

/// Result type used throughout this crate.
pub type Result<T, E = DomError> = std::result::Result<T, E>;
