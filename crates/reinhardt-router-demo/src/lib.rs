//! Reinhardt Router Demo
//!
//! A small page exercising every router feature: a header, a navigation bar
//! of [`Link`]s, a main section of [`Route`]s and a footer.
//!
//! | Link | Renders |
//! |------|---------|
//! | `/` | `Hello Index!` |
//! | `people` | `Hello People` |
//! | `people/1` | `Hello People_1` |
//! | `hello` | `Hello Hello` |
//!
//! Natively the page runs on a [`MemoryHistory`] through a [`DemoSession`];
//! in the browser [`start`] mounts it into the document body.

use reinhardt_router::{
	ActivationEvent, Component, IntoView, Link, MemoryHistory, Navigation, Route, RouterConfig, RouterContext,
	RouterError, RouterMode, RouterProvider, RouterState, Routes, View,
};
use std::rc::Rc;
use thiserror::Error;

/// Targets of the navigation bar, with their labels.
pub const NAV_LINKS: [(&str, &str); 4] = [
	("/", "Home"),
	("people", "People"),
	("people/1", "People/1"),
	("hello", "Hello"),
];

/// Errors raised while driving the demo page.
#[derive(Debug, Error)]
pub enum DemoError {
	/// The router rejected an operation.
	#[error(transparent)]
	Router(#[from] RouterError),
	/// No link on the page points at the requested target.
	#[error("No link to '{0}' on the page")]
	UnknownLink(String),
	/// State could not be serialized.
	#[error("Serialization failed: {0}")]
	Json(#[from] serde_json::Error),
}

/// The demo page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoApp;

impl DemoApp {
	/// Returns the navigation link pointing at `to`, if the page has one.
	pub fn link(to: &str) -> Option<Link> {
		NAV_LINKS
			.iter()
			.find(|(target, _)| *target == to)
			.map(|&(target, label)| Link::new(target, move || label))
	}

	fn nav(router: &RouterContext) -> View {
		let mut items = Vec::new();
		for (i, &(to, _)) in NAV_LINKS.iter().enumerate() {
			if i > 0 {
				items.push(View::text(" "));
				items.push(View::element("br").into_view());
			}
			items.extend(Self::link(to).map(|link| link.render(router)));
		}
		View::element("nav")
			.attr("style", "padding: 10px")
			.children(items)
			.into_view()
	}

	fn routes() -> Routes {
		Routes::new()
			.route(Route::index().element(|| View::element("h1").child("Hello Index!")))
			.route(
				Route::path("people")
					.exact(true)
					.children(|| View::element("h1").child("Hello People")),
			)
			.route(
				Route::path("people/1")
					.exact(true)
					.children(|| View::element("h1").child("Hello People_1")),
			)
			.route(
				Route::path("hello")
					.exact(true)
					.children(|| View::element("h1").child("Hello Hello")),
			)
	}
}

impl Component for DemoApp {
	fn render(&self, router: &RouterContext) -> View {
		View::element("div")
			.attr("class", "App")
			.child(
				View::element("header")
					.attr("class", "App-header")
					.child("App Header"),
			)
			.child(Self::nav(router))
			.child(
				View::element("main")
					.attr("style", "padding: 10px")
					.child(Self::routes().render(router)),
			)
			.child(
				View::element("footer")
					.attr("class", "App-footer")
					.child("App Footer"),
			)
			.into_view()
	}

	fn name() -> &'static str {
		"DemoApp"
	}
}

/// Configuration the page is served with by default: hash mode at `/`.
pub fn default_config() -> RouterConfig {
	RouterConfig::new(RouterMode::Hash)
}

/// The demo page mounted on an in-memory history.
#[derive(Debug)]
pub struct DemoSession {
	history: MemoryHistory,
	provider: RouterProvider,
}

impl DemoSession {
	/// Mounts the page at `initial_url`.
	pub fn new(initial_url: &str, config: RouterConfig) -> Result<Self, DemoError> {
		let history = MemoryHistory::new(initial_url)?;
		let provider = RouterProvider::new(Rc::new(history.clone()), config)?;
		tracing::info!(url = %initial_url, "Demo page mounted");
		Ok(Self { history, provider })
	}

	/// Returns the router handle of the page.
	pub fn router(&self) -> RouterContext {
		self.provider.context()
	}

	/// Returns the underlying history.
	pub fn history(&self) -> &MemoryHistory {
		&self.history
	}

	/// Renders the page against the current location.
	pub fn render(&self) -> View {
		DemoApp.render(&self.router())
	}

	/// Renders the page to HTML.
	pub fn html(&self) -> String {
		self.render().render_to_string()
	}

	/// Returns the text of the `main` section.
	pub fn main_text(&self) -> String {
		let router = self.router();
		DemoApp::routes().render(&router).text_content()
	}

	/// Clicks the navigation link pointing at `to`.
	///
	/// A navigation the history rejects is returned as [`DemoError::Router`].
	pub fn click(&self, to: &str) -> Result<Navigation, DemoError> {
		let link = DemoApp::link(to).ok_or_else(|| DemoError::UnknownLink(to.to_string()))?;
		let mut event = ActivationEvent::new();
		let navigation = link.activate(&self.router(), &mut event)?;
		tracing::debug!(to, ?navigation, "Clicked link");
		Ok(navigation)
	}

	/// Returns the router state.
	pub fn state(&self) -> RouterState {
		self.router().state()
	}

	/// Serializes the router state as pretty JSON.
	pub fn state_json(&self) -> Result<String, DemoError> {
		Ok(serde_json::to_string_pretty(&self.state())?)
	}
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::DemoApp;
	use reinhardt_router::{
		Component, RouterConfig, RouterError, RouterMode, RouterProvider, Subscription,
	};
	use std::cell::RefCell;
	use wasm_bindgen::prelude::*;

	thread_local! {
		static APP: RefCell<Option<(RouterProvider, Subscription)>> = const { RefCell::new(None) };
	}

	fn body() -> Result<web_sys::HtmlElement, RouterError> {
		web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
			.ok_or_else(|| RouterError::HistoryUnavailable("no document body".to_string()))
	}

	fn mount_page(provider: &RouterProvider) -> Result<(), RouterError> {
		let body = body()?;
		body.set_inner_html("");
		DemoApp.render(&provider.context()).mount(&body)
	}

	/// Mounts the demo page into the document body.
	#[wasm_bindgen(start)]
	pub fn start() -> Result<(), JsValue> {
		let config = RouterConfig::new(RouterMode::Hash);
		let provider = RouterProvider::with_shared_history(config)
			.map_err(|e| JsValue::from_str(&e.to_string()))?;
		mount_page(&provider).map_err(|e| JsValue::from_str(&e.to_string()))?;

		let router = provider.context();
		let subscription = router.subscribe(|_| {
			APP.with(|app| {
				if let Some((provider, _)) = app.borrow().as_ref()
					&& let Err(e) = mount_page(provider)
				{
					reinhardt_router::error_log!("Failed to re-render demo page: {}", e);
				}
			});
		});
		APP.with(|app| *app.borrow_mut() = Some((provider, subscription)));
		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::start;
