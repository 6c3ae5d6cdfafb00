//! # Demo Router
//!
//! A minimal client-side URL router with path and hash modes.
//!
//! This crate re-exports [`reinhardt_router`] and, with the `demo` feature
//! (enabled by default), the sample page from `reinhardt-router-demo`.
//!
//! ## Feature Flags
//!
//! - `demo` (default): the sample page under [`demo`]
//! - `debug-hooks`: route matching and navigation debug logs
//!
//! ## Quick Example
//!
//! ```
//! use std::rc::Rc;
//! use demo_router::{Component, Link, MemoryHistory, Route, RouterProvider, View};
//!
//! let history = MemoryHistory::new("http://localhost/").unwrap();
//! let provider = RouterProvider::hash(Rc::new(history), "/").unwrap();
//! let router = provider.context();
//!
//! let hello = Route::path("hello").exact(true).element(|| View::text("Hello Hello"));
//! Link::new("hello", || "Hello")
//!     .render(&router)
//!     .find_element("data-to", "hello")
//!     .unwrap()
//!     .click();
//!
//! assert_eq!(hello.render(&router).text_content(), "Hello Hello");
//! ```

pub use reinhardt_router::*;

/// The sample page.
#[cfg(feature = "demo")]
pub mod demo {
	pub use reinhardt_router_demo::*;
}
