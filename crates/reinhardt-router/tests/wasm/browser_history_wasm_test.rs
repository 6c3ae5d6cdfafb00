//! Browser history tests
//!
//! Run with `wasm-pack test --headless --chrome crates/reinhardt-router`.

#![cfg(target_arch = "wasm32")]

use reinhardt_router::{
	BrowserHistory, Component, History, Link, Navigation, Route, RouterProvider, View,
};
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn reset_location() {
	let history = BrowserHistory::new().unwrap();
	history.replace("/#/").unwrap();
}

#[wasm_bindgen_test]
fn test_browser_history_push_updates_location() {
	reset_location();
	let history = BrowserHistory::new().unwrap();

	history.push("#/people").unwrap();

	assert_eq!(history.location().hash, "#/people");
}

#[wasm_bindgen_test]
fn test_hash_provider_tracks_pushes() {
	reset_location();
	let provider = RouterProvider::hash(Rc::new(BrowserHistory::new().unwrap()), "/").unwrap();
	let router = provider.context();
	let route = Route::path("hello")
		.exact(true)
		.element(|| View::text("Hello Hello"));

	assert!(route.render(&router).is_empty());
	assert_eq!(
		router.navigate("hello").unwrap(),
		Navigation::Navigated("#/hello".to_string())
	);
	assert_eq!(route.render(&router).text_content(), "Hello Hello");
	assert_eq!(router.navigate("hello").unwrap(), Navigation::NoOp);
}

#[wasm_bindgen_test]
fn test_mounted_link_intercepts_click() {
	reset_location();
	let provider = RouterProvider::hash(Rc::new(BrowserHistory::new().unwrap()), "/").unwrap();
	let router = provider.context();
	let document = web_sys::window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();

	Link::new("people", || "People")
		.render(&router)
		.mount(&container)
		.unwrap();

	let anchor = container
		.query_selector("a[data-to=\"people\"]")
		.unwrap()
		.unwrap();
	let html: &web_sys::HtmlElement = wasm_bindgen::JsCast::unchecked_ref(&anchor);
	html.click();

	assert_eq!(router.route().hash, "#/people");
}
