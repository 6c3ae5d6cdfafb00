//! Integration tests for the demo page
//!
//! Drives the page through its navigation bar the way a visitor would.

use reinhardt_router::{History, Navigation, RouterConfig, RouterMode};
use reinhardt_router_demo::{DemoError, DemoSession, default_config};
use rstest::*;
use std::io::Write;

#[fixture]
fn session() -> DemoSession {
	DemoSession::new("http://localhost/", default_config()).unwrap()
}

#[rstest]
fn test_mount_redirects_to_fragment_root(session: DemoSession) {
	assert_eq!(session.history().assigned(), vec!["/#/".to_string()]);
	assert_eq!(session.router().route().hash, "#/");
	assert_eq!(session.main_text(), "Hello Index!");
}

#[rstest]
#[case("people", "Hello People")]
#[case("people/1", "Hello People_1")]
#[case("hello", "Hello Hello")]
fn test_click_renders_exactly_one_route(
	session: DemoSession,
	#[case] to: &str,
	#[case] expected: &str,
) {
	let navigation = session.click(to).unwrap();

	assert_eq!(navigation, Navigation::Navigated(format!("#/{}", to)));
	assert_eq!(session.main_text(), expected);
}

#[rstest]
fn test_repeated_click_is_no_op(session: DemoSession) {
	session.click("people").unwrap();
	let entries = session.history().entry_count();

	assert_eq!(session.click("people").unwrap(), Navigation::NoOp);
	assert_eq!(session.history().entry_count(), entries);
	assert_eq!(session.main_text(), "Hello People");
}

#[rstest]
fn test_home_link_returns_to_index(session: DemoSession) {
	session.click("hello").unwrap();
	session.click("/").unwrap();

	assert_eq!(session.router().route().hash, "#/");
	assert_eq!(session.main_text(), "Hello Index!");
}

#[rstest]
fn test_page_layout(session: DemoSession) {
	let html = session.html();

	assert!(html.starts_with("<div class=\"App\"><header class=\"App-header\">App Header</header>"));
	assert!(html.contains("<a href=\"#/people/1\" data-link=\"true\" data-to=\"people/1\">People/1</a>"));
	assert!(html.contains("<main style=\"padding: 10px\"><h1>Hello Index!</h1></main>"));
	assert!(html.ends_with("<footer class=\"App-footer\">App Footer</footer></div>"));
}

#[rstest]
fn test_path_mode_with_basename() {
	let config = RouterConfig::new(RouterMode::Path).with_basename("/app");
	let session = DemoSession::new("http://localhost/app/", config).unwrap();

	assert_eq!(session.main_text(), "Hello Index!");
	session.click("people/1").unwrap();
	assert_eq!(session.history().location().pathname, "/app/people/1");
	assert_eq!(session.main_text(), "Hello People_1");
	assert!(session.history().assigned().is_empty());
}

#[rstest]
fn test_state_json(session: DemoSession) {
	session.click("people").unwrap();
	let json: serde_json::Value = serde_json::from_str(&session.state_json().unwrap()).unwrap();

	assert_eq!(json["config"]["mode"], "hash");
	assert_eq!(json["config"]["basename"], "/");
	assert_eq!(json["route"]["hash"], "#/people");
	assert_eq!(json["route"]["path"], "/");
}

#[rstest]
fn test_config_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "basename = \"/demo\"\nmode = \"hash\"").unwrap();
	let config = RouterConfig::from_file(file.path()).unwrap();

	let session = DemoSession::new("http://localhost/demo/", config).unwrap();
	assert_eq!(session.history().assigned(), vec!["/demo/#/".to_string()]);
	assert_eq!(session.main_text(), "Hello Index!");
}

#[rstest]
fn test_click_reports_rejected_push() {
	let config = RouterConfig::new(RouterMode::Path);
	let session = DemoSession::new("data:text/plain,hi", config).unwrap();

	let result = session.click("hello");

	assert!(matches!(result, Err(DemoError::Router(_))));
	assert_eq!(session.history().entry_count(), 1);
}

#[rstest]
fn test_invalid_initial_url() {
	let result = DemoSession::new("not a url", default_config());
	assert!(matches!(result, Err(DemoError::Router(_))));
}
