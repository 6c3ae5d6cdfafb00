//! Reinhardt Router - Minimal Client-side URL Router
//!
//! Maps the current URL to what a page should render, and intercepts link
//! activation so navigation happens through a history abstraction instead of
//! full page loads.
//!
//! ## Features
//!
//! - **Two modes**: path mode (`/app/people`) and hash mode (`/app/#/people`)
//! - **Explicit state**: a [`RouterProvider`] owns the subscription to a
//!   [`History`]; routes and links read it through a [`RouterContext`]
//! - **Prefix or exact matching**: [`Route`] compares normalized URLs
//! - **No-op links**: a [`Link`] to the current location does nothing
//! - **Targets**: `BrowserHistory` on `wasm32`, [`MemoryHistory`] everywhere
//!
//! ## Architecture
//!
//! - [`url`]: URL joining, trimming and query parsing
//! - [`location`]: location snapshots and route descriptors
//! - [`history`]: the history abstraction and its implementations
//! - [`config`]: router configuration
//! - [`provider`]: router state ownership and distribution
//! - [`route`]: route declarations and matching
//! - [`link`]: navigation links
//! - [`view`]: renderable content
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use reinhardt_router::{Component, Link, MemoryHistory, Route, RouterProvider, View};
//!
//! let history = MemoryHistory::new("http://localhost/").unwrap();
//! let provider = RouterProvider::hash(Rc::new(history), "/").unwrap();
//! let router = provider.context();
//!
//! let people = Route::path("people")
//!     .exact(true)
//!     .element(|| View::text("Hello People"));
//! assert!(people.render(&router).is_empty());
//!
//! let link = Link::new("people", || "People").render(&router);
//! link.find_element("data-to", "people").unwrap().click();
//!
//! assert_eq!(people.render(&router).render_to_string(), "Hello People");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod history;
pub mod link;
pub mod location;
pub mod logging;
pub mod provider;
pub mod route;
pub mod url;
pub mod view;

pub use config::{RouterConfig, RouterMode};
pub use error::RouterError;
pub use history::{
	History, HistoryListener, MemoryHistory, NavigationType, SharedHistory, Unlisten,
	shared_history,
};
pub use link::{Link, LinkCallback, Navigation};
pub use location::{Location, RouteDescriptor};
pub use provider::{Bootstrap, RouterContext, RouterProvider, RouterState, Subscription, use_router};
pub use route::{Route, RouteMatch, Routes, ViewFactory};
pub use url::{QueryParams, join_url, ltrim, parse_query};
pub use view::{ActivationEvent, ClickHandler, Component, ElementView, IntoView, View};

#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;

#[doc(hidden)]
pub mod __private {
	pub use tracing;
	pub use web_sys;
}
