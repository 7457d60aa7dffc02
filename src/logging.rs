//! Logging abstraction layer for reinhardt-dom
//!
//! Diagnostics go to the browser console on WASM and to `tracing` on native
//! targets. Native output is filtered by the subscriber the embedding
//! application installs. Console output is compiled out of release builds.
//!
//! ## Macro Overview
//!
//! | Macro | WASM | WASM condition | Non-WASM |
//! |-------|------|----------------|----------|
//! | `debug_log!` | `console.debug` | `debug_assertions` + `debug-hooks` | `tracing::debug!` |
//! | `info_log!` | `console.info` | `debug_assertions` | `tracing::info!` |
//! | `warn_log!` | `console.warn` | `debug_assertions` | `tracing::warn!` |
//! | `error_log!` | `console.error` | `debug_assertions` | `tracing::error!` |
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_dom::{debug_log, warn_log};
//!
//! debug_log!("Adding event listener {:?} to {}", "click", describe(&element));
//! warn_log!("event {:?} received {} arguments", "click", 2);
//! ```

/// Logs a debug message.
///
/// On WASM this requires both the `debug-hooks` feature and `debug_assertions`.
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(all(
	target_arch = "wasm32",
	not(all(debug_assertions, feature = "debug-hooks"))
))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs a debug message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "reinhardt_dom", "{}", format_args!($($arg)*));
	}};
}

/// Logs an info message (requires `debug_assertions` on WASM).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// No-op info_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "reinhardt_dom", "{}", format_args!($($arg)*));
	}};
}

/// Logs a warning message (requires `debug_assertions` on WASM).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// No-op warn_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "reinhardt_dom", "{}", format_args!($($arg)*));
	}};
}

/// Logs an error message (requires `debug_assertions` on WASM).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// No-op error_log in release WASM builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "reinhardt_dom", "{}", format_args!($($arg)*));
	}};
}
