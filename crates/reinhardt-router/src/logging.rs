//! Logging abstraction layer for reinhardt-router
//!
//! The router runs both in the browser and natively (tests, the demo
//! binary, server-side rendering). These macros pick the right sink for
//! each target so router code can log without caring where it runs.
//!
//! ## Macro Overview
//!
//! | Macro | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------|----------|
//! | `debug_log!` | `debug-hooks` + `debug_assertions` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | None | `console.info` | `tracing::info!` |
//! | `warn_log!` | None | `console.warn` | `tracing::warn!` |
//! | `error_log!` | None | `console.error` | `tracing::error!` |
//!
//! Natively, all events are emitted under the `reinhardt_router` target so
//! a subscriber can filter them with `RUST_LOG=reinhardt_router=debug`.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_router::{debug_log, info_log, warn_log};
//!
//! debug_log!("route descriptor: {:?}", route);
//! info_log!("router mounted in {:?} mode", mode);
//! warn_log!("route declares both index and path: {}", path);
//! ```

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
///
/// Compiles to a no-op when either condition is not met.
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(
	debug_assertions,
	feature = "debug-hooks",
	not(target_arch = "wasm32")
))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "reinhardt_router", $($arg)*);
	}};
}

/// No-op debug_log when conditions are not met
///
/// The arguments are still type-checked so they never trigger unused warnings.
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		if false {
			let _ = format_args!($($arg)*);
		}
	}};
}

/// Logs an info message
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "reinhardt_router", $($arg)*);
	}};
}

/// Logs a warning message
///
/// Used for caller mistakes the router tolerates, such as a malformed
/// percent-encoded query value.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "reinhardt_router", $($arg)*);
	}};
}

/// Logs an error message
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "reinhardt_router", $($arg)*);
	}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	#[rstest]
	fn test_macros_expand_without_subscriber() {
		let path = "/people";
		debug_log!("debug {}", path);
		info_log!("info {}", path);
		warn_log!("warn {}", path);
		error_log!("error {}", path);
	}
}
