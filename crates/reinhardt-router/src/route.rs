//! Route declarations and matching.
//!
//! A [`Route`] renders its content when the current location matches its
//! declared path. Matching is plain string comparison on normalized URLs:
//!
//! | Mode | Route URL | Location URL |
//! |------|-----------|--------------|
//! | path | `basename + path`, leading `/` trimmed | location path, leading `/` trimmed |
//! | hash | `basename + "/#/" + path`, leading `/` trimmed | `basename + "/#/" + fragment`, leading `/` trimmed |
//!
//! An `exact` route requires equality; otherwise the location only needs to
//! start with the route URL. Index routes always compare exactly.

use crate::config::{RouterConfig, RouterMode};
use crate::error::RouterError;
use crate::provider::{RouterContext, RouterState};
use crate::url::{join_url, ltrim};
use crate::view::{Component, IntoView, View};
use crate::{debug_log, error_log};
use std::rc::Rc;

/// Factory producing a route's content on each render.
pub type ViewFactory = Rc<dyn Fn() -> View>;

/// Outcome of matching a route against the router state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
	/// The route's content should be rendered.
	Matched,
	/// The route renders nothing.
	NotMatched,
}

impl RouteMatch {
	/// Returns `true` for [`RouteMatch::Matched`].
	pub fn is_match(&self) -> bool {
		matches!(self, Self::Matched)
	}
}

/// A route declaration.
///
/// # Example
///
/// ```
/// use reinhardt_router::{Route, View};
///
/// let index = Route::index().element(|| View::text("Hello Index!"));
/// let people = Route::path("people")
///     .exact(true)
///     .children(|| View::text("Hello People"));
/// ```
#[derive(Clone, Default)]
pub struct Route {
	path: Option<String>,
	exact: bool,
	index: bool,
	element: Option<ViewFactory>,
	children: Option<ViewFactory>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("exact", &self.exact)
			.field("index", &self.index)
			.field("has_element", &self.element.is_some())
			.field("has_children", &self.children.is_some())
			.finish()
	}
}

impl Route {
	/// Creates a route without a path; it matches every location.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a route for `path`, relative to the basename.
	pub fn path(path: impl Into<String>) -> Self {
		Self {
			path: Some(path.into()),
			..Self::default()
		}
	}

	/// Creates an index route, matching only the root of the active mode.
	pub fn index() -> Self {
		Self {
			index: true,
			..Self::default()
		}
	}

	/// Sets the path on an existing declaration.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Marks the declaration as an index route.
	pub fn with_index(mut self, index: bool) -> Self {
		self.index = index;
		self
	}

	/// Requires the location to equal the route URL instead of starting with it.
	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	/// Sets the element rendered on match. Takes precedence over children.
	pub fn element<F, V>(mut self, element: F) -> Self
	where
		F: Fn() -> V + 'static,
		V: IntoView,
	{
		self.element = Some(Rc::new(move || element().into_view()));
		self
	}

	/// Sets the children rendered on match when no element is set.
	pub fn children<F, V>(mut self, children: F) -> Self
	where
		F: Fn() -> V + 'static,
		V: IntoView,
	{
		self.children = Some(Rc::new(move || children().into_view()));
		self
	}

	/// Returns the declared path.
	pub fn declared_path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	/// Returns whether this is an index route.
	pub fn is_index(&self) -> bool {
		self.index
	}

	/// Returns whether this route matches exactly.
	pub fn is_exact(&self) -> bool {
		self.exact || self.index
	}

	/// Rejects declarations that are both `index` and `path` routes.
	pub fn validate(&self) -> Result<(), RouterError> {
		match (&self.path, self.index) {
			(Some(path), true) => Err(RouterError::ConflictingDeclaration { path: path.clone() }),
			_ => Ok(()),
		}
	}

	/// Returns the normalized URL this declaration stands for.
	pub fn route_url(&self, config: &RouterConfig) -> String {
		let target = if self.index {
			""
		} else {
			self.path.as_deref().unwrap_or("")
		};
		let joined = match config.mode {
			RouterMode::Hash => join_url([config.basename.as_str(), "/#/", target]),
			RouterMode::Path => join_url([config.basename.as_str(), target]),
		};
		ltrim(&joined, Some("/")).to_string()
	}

	/// Returns the normalized URL of the current location.
	pub fn location_url(state: &RouterState) -> String {
		match state.config.mode {
			RouterMode::Hash => {
				let fragment = ltrim(&state.route.hash, Some("#/"));
				let joined = join_url([state.config.basename.as_str(), "/#/", fragment]);
				ltrim(&joined, Some("/")).to_string()
			}
			RouterMode::Path => ltrim(&state.route.path, Some("/")).to_string(),
		}
	}

	/// Matches this declaration against a state snapshot.
	pub fn match_state(&self, state: &RouterState) -> Result<RouteMatch, RouterError> {
		self.validate()?;

		let route_url = self.route_url(&state.config);
		let location_url = Self::location_url(state);
		let matched = if self.is_exact() {
			location_url == route_url
		} else {
			location_url.starts_with(&route_url)
		};
		debug_log!(
			"Route {:?} vs location {:?}: {}",
			route_url,
			location_url,
			matched
		);

		Ok(if matched {
			RouteMatch::Matched
		} else {
			RouteMatch::NotMatched
		})
	}

	/// Matches this declaration against the router's current state.
	pub fn matches(&self, router: &RouterContext) -> Result<RouteMatch, RouterError> {
		self.match_state(&router.state())
	}

	/// Renders the content on match and [`View::Empty`] otherwise.
	pub fn try_render(&self, router: &RouterContext) -> Result<View, RouterError> {
		Ok(match self.matches(router)? {
			RouteMatch::Matched => self.content(),
			RouteMatch::NotMatched => View::Empty,
		})
	}

	fn content(&self) -> View {
		if let Some(element) = &self.element {
			element()
		} else if let Some(children) = &self.children {
			children()
		} else {
			View::Empty
		}
	}
}

impl Component for Route {
	/// Renders like [`Route::try_render`]; an invalid declaration is logged
	/// and renders nothing.
	fn render(&self, router: &RouterContext) -> View {
		self.try_render(router).unwrap_or_else(|e| {
			error_log!("{}", e);
			View::Empty
		})
	}

	fn name() -> &'static str {
		"Route"
	}
}

/// An ordered group of routes with an optional fallback.
///
/// Every matching route renders, in declaration order. The fallback renders
/// only when none matched.
#[derive(Clone, Default)]
pub struct Routes {
	routes: Vec<Route>,
	fallback: Option<ViewFactory>,
}

impl std::fmt::Debug for Routes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Routes")
			.field("routes", &self.routes)
			.field("has_fallback", &self.fallback.is_some())
			.finish()
	}
}

impl Routes {
	/// Creates an empty group.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a route.
	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Sets the content rendered when no route matches.
	pub fn fallback<F, V>(mut self, fallback: F) -> Self
	where
		F: Fn() -> V + 'static,
		V: IntoView,
	{
		self.fallback = Some(Rc::new(move || fallback().into_view()));
		self
	}

	/// Returns the number of declared routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns `true` if no routes are declared.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Validates every declaration, returning the first conflict.
	pub fn validate(&self) -> Result<(), RouterError> {
		self.routes.iter().try_for_each(Route::validate)
	}

	/// Returns the indices of the routes matching the current state.
	pub fn matching(&self, router: &RouterContext) -> Result<Vec<usize>, RouterError> {
		let state = router.state();
		let mut matched = Vec::new();
		for (i, route) in self.routes.iter().enumerate() {
			if route.match_state(&state)?.is_match() {
				matched.push(i);
			}
		}
		Ok(matched)
	}

	/// Renders the matching routes, or the fallback when none matched.
	pub fn try_render(&self, router: &RouterContext) -> Result<View, RouterError> {
		let matched = self.matching(router)?;
		if matched.is_empty() {
			return Ok(self
				.fallback
				.as_ref()
				.map(|fallback| fallback())
				.unwrap_or(View::Empty));
		}
		Ok(View::Fragment(
			matched.into_iter().map(|i| self.routes[i].content()).collect(),
		))
	}
}

impl Component for Routes {
	fn render(&self, router: &RouterContext) -> View {
		self.try_render(router).unwrap_or_else(|e| {
			error_log!("{}", e);
			View::Empty
		})
	}

	fn name() -> &'static str {
		"Routes"
	}
}
