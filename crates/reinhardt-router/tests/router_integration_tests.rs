//! Integration tests for the client-side router
//!
//! These tests drive a provider, routes and links together the way a page
//! does:
//! 1. Hash-mode bootstrap and route matching
//! 2. Link activation and no-op navigation
//! 3. Back/forward traversal
//! 4. Provider teardown

use reinhardt_router::{
	ActivationEvent, Bootstrap, Component, History, Link, MemoryHistory, Navigation, Route,
	RouterConfig, RouterError, RouterMode, RouterProvider, Routes, SharedHistory, View,
};
use rstest::*;
use std::cell::Cell;
use std::rc::Rc;

fn page_routes() -> Routes {
	Routes::new()
		.route(Route::index().element(|| View::text("Hello Index!")))
		.route(
			Route::path("people")
				.exact(true)
				.children(|| View::text("Hello People")),
		)
		.route(
			Route::path("people/1")
				.exact(true)
				.children(|| View::text("Hello People_1")),
		)
		.route(Route::path("hello").exact(true).children(|| View::text("Hello Hello")))
}

#[fixture]
fn hash_history() -> MemoryHistory {
	MemoryHistory::new("http://localhost/").unwrap()
}

#[rstest]
fn test_hash_mode_page_round_trip(hash_history: MemoryHistory) {
	let provider = RouterProvider::hash(Rc::new(hash_history.clone()), "/").unwrap();
	let router = provider.context();
	let routes = page_routes();

	assert_eq!(provider.bootstrap(), &Bootstrap::Redirected("/#/".to_string()));
	assert_eq!(routes.render(&router).text_content(), "Hello Index!");

	for (to, expected) in [
		("people", "Hello People"),
		("people/1", "Hello People_1"),
		("hello", "Hello Hello"),
		("/", "Hello Index!"),
	] {
		let nav = Link::new(to, || "link").render(&router);
		nav.find_element("data-to", to).unwrap().click();
		assert_eq!(routes.render(&router).text_content(), expected, "after {}", to);
	}
}

#[rstest]
fn test_exact_route_does_not_match_deeper_location(hash_history: MemoryHistory) {
	hash_history.push("#/people/1").unwrap();
	let provider = RouterProvider::hash(Rc::new(hash_history), "/").unwrap();
	let router = provider.context();

	assert!(
		Route::path("people")
			.exact(true)
			.render(&router)
			.is_empty()
	);
	assert_eq!(
		Route::path("people")
			.children(|| "People section")
			.render(&router)
			.render_to_string(),
		"People section"
	);
}

#[rstest]
fn test_link_to_current_location_is_no_op(hash_history: MemoryHistory) {
	let provider = RouterProvider::hash(Rc::new(hash_history.clone()), "/").unwrap();
	let router = provider.context();
	router.navigate("people").unwrap();
	let entries = hash_history.entry_count();
	let revision = router.revision();

	let clicked = Rc::new(Cell::new(false));
	let link = {
		let clicked = Rc::clone(&clicked);
		Link::new("people", || "People").on_click(move |_| clicked.set(true))
	};
	let mut event = ActivationEvent::new();

	assert_eq!(link.activate(&router, &mut event).unwrap(), Navigation::NoOp);
	assert!(event.is_default_prevented());
	assert!(!clicked.get());
	assert_eq!(hash_history.entry_count(), entries);
	assert_eq!(router.revision(), revision);
}

#[rstest]
fn test_back_and_forward_update_routes(hash_history: MemoryHistory) {
	let provider = RouterProvider::hash(Rc::new(hash_history.clone()), "/").unwrap();
	let router = provider.context();
	let routes = page_routes();

	router.navigate("people").unwrap();
	router.navigate("hello").unwrap();
	assert!(hash_history.back());
	assert_eq!(routes.render(&router).text_content(), "Hello People");
	assert!(hash_history.forward());
	assert_eq!(routes.render(&router).text_content(), "Hello Hello");
}

#[rstest]
fn test_path_mode_with_basename() {
	let history = MemoryHistory::new("http://localhost/app/").unwrap();
	let provider = RouterProvider::browser(Rc::new(history.clone()), "/app").unwrap();
	let router = provider.context();
	let routes = page_routes().fallback(|| "Not Found");

	assert_eq!(routes.render(&router).text_content(), "Hello Index!");

	router.navigate("people/1").unwrap();
	assert_eq!(history.location().pathname, "/app/people/1");
	assert_eq!(routes.render(&router).text_content(), "Hello People_1");

	history.push("/elsewhere").unwrap();
	assert_eq!(routes.render(&router).text_content(), "Not Found");
}

#[rstest]
fn test_query_parameters_are_exposed(hash_history: MemoryHistory) {
	hash_history.push("/?page=2&q=hello%20world&flag").unwrap();
	let provider = RouterProvider::new(
		Rc::new(hash_history),
		RouterConfig::new(RouterMode::Path),
	)
	.unwrap();
	let route = provider.context().route();

	assert_eq!(route.query_param("page"), Some("2"));
	assert_eq!(route.query_param("q"), Some("hello world"));
	assert_eq!(route.query.get("flag"), Some(&None));
}

#[rstest]
fn test_conflicting_route_renders_nothing(hash_history: MemoryHistory) {
	let provider = RouterProvider::hash(Rc::new(hash_history), "/").unwrap();
	let route = Route::index().with_path("people").element(|| "never");

	assert!(matches!(
		route.matches(&provider.context()),
		Err(RouterError::ConflictingDeclaration { .. })
	));
	assert!(route.render(&provider.context()).is_empty());
}

#[rstest]
fn test_dropped_provider_stops_listening(hash_history: MemoryHistory) {
	let shared: SharedHistory = Rc::new(hash_history.clone());
	let provider = RouterProvider::hash(Rc::clone(&shared), "/").unwrap();
	let router = provider.context();
	assert_eq!(hash_history.listener_count(), 1);

	drop(provider);
	shared.push("#/people").unwrap();

	assert_eq!(hash_history.listener_count(), 0);
	assert_eq!(router.route().hash, "#/");
	assert!(!router.is_mounted());
}
