//! Renderable content for routes and links.
//!
//! The router is not a rendering framework. This module carries just
//! enough of one to express route content, "render nothing", and an
//! activating element whose click can be intercepted.

use crate::provider::RouterContext;
use std::borrow::Cow;
use std::rc::Rc;

/// Handler attached to an element's click/activation.
pub type ClickHandler = Rc<dyn Fn(&mut ActivationEvent)>;

/// An activation (click) delivered to an element.
///
/// Natively this is a plain flag holder; in the browser it also wraps the
/// DOM event so [`prevent_default`](Self::prevent_default) reaches it.
#[derive(Debug, Default)]
pub struct ActivationEvent {
	default_prevented: bool,
	#[cfg(target_arch = "wasm32")]
	native: Option<web_sys::Event>,
}

impl ActivationEvent {
	/// Creates a synthetic activation.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps a DOM event.
	#[cfg(target_arch = "wasm32")]
	pub fn from_native(event: web_sys::Event) -> Self {
		Self {
			default_prevented: event.default_prevented(),
			native: Some(event),
		}
	}

	/// Suppresses the element's native behaviour.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
		#[cfg(target_arch = "wasm32")]
		if let Some(event) = &self.native {
			event.prevent_default();
		}
	}

	/// Returns whether [`prevent_default`](Self::prevent_default) was called.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented
	}
}

/// A unified representation of renderable content.
#[derive(Debug)]
pub enum View {
	/// A DOM element.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	Empty,
}

/// Represents a DOM element in the view tree.
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
	on_click: Option<ClickHandler>,
}

impl std::fmt::Debug for ElementView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ElementView")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("children", &self.children)
			.field("is_void", &self.is_void)
			.field("has_click_handler", &self.on_click.is_some())
			.finish()
	}
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
			on_click: None,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Sets the click handler.
	pub fn on_click(mut self, handler: ClickHandler) -> Self {
		self.on_click = Some(handler);
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute named `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Delivers a synthetic click, returning the event after handlers ran.
	pub fn click(&self) -> ActivationEvent {
		let mut event = ActivationEvent::new();
		if let Some(handler) = &self.on_click {
			handler(&mut event);
		}
		event
	}
}

impl View {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns `true` for [`View::Empty`] and fragments of empty views.
	pub fn is_empty(&self) -> bool {
		match self {
			View::Empty => true,
			View::Fragment(children) => children.iter().all(View::is_empty),
			_ => false,
		}
	}

	/// Finds the first element (depth-first) whose attribute `name` equals `value`.
	pub fn find_element(&self, name: &str, value: &str) -> Option<&ElementView> {
		match self {
			View::Element(el) => {
				if el.get_attr(name) == Some(value) {
					return Some(el);
				}
				el.child_views()
					.iter()
					.find_map(|child| child.find_element(name, value))
			}
			View::Fragment(children) => children
				.iter()
				.find_map(|child| child.find_element(name, value)),
			View::Text(_) | View::Empty => None,
		}
	}

	/// Returns the concatenated text of this view, without markup.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.collect_text(&mut output);
		output
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			View::Element(el) => el.child_views().iter().for_each(|c| c.collect_text(output)),
			View::Text(text) => output.push_str(text),
			View::Fragment(children) => children.iter().for_each(|c| c.collect_text(output)),
			View::Empty => {}
		}
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Mounts the view under a DOM element, wiring click handlers.
	#[cfg(target_arch = "wasm32")]
	pub fn mount(self, parent: &web_sys::Element) -> Result<(), crate::RouterError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| crate::RouterError::HistoryUnavailable("no document".to_string()))?;
		let dom_err = |e: wasm_bindgen::JsValue| {
			crate::RouterError::NavigationFailed(format!("DOM error: {:?}", e))
		};

		match self {
			View::Element(el) => {
				let element = document.create_element(&el.tag).map_err(dom_err)?;
				for (name, value) in &el.attrs {
					element.set_attribute(name, value).map_err(dom_err)?;
				}
				if let Some(handler) = el.on_click {
					let closure = Closure::<dyn FnMut(web_sys::Event)>::new(
						move |event: web_sys::Event| {
							let mut activation = ActivationEvent::from_native(event);
							handler(&mut activation);
						},
					);
					element
						.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
						.map_err(dom_err)?;
					// The element owns the listener for the rest of its life.
					closure.forget();
				}
				for child in el.children {
					child.mount(&element)?;
				}
				parent.append_child(&element).map_err(dom_err)?;
			}
			View::Text(text) => {
				let node = document.create_text_node(&text);
				parent.append_child(&node).map_err(dom_err)?;
			}
			View::Fragment(children) => {
				for child in children {
					child.mount(parent)?;
				}
			}
			View::Empty => {}
		}
		Ok(())
	}
}

/// Trait for types that can be converted into a View.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

impl<A: IntoView, B: IntoView> IntoView for (A, B) {
	fn into_view(self) -> View {
		View::Fragment(vec![self.0.into_view(), self.1.into_view()])
	}
}

impl<A: IntoView, B: IntoView, C: IntoView> IntoView for (A, B, C) {
	fn into_view(self) -> View {
		View::Fragment(vec![
			self.0.into_view(),
			self.1.into_view(),
			self.2.into_view(),
		])
	}
}

/// A router-aware component.
///
/// Router state is handed down explicitly: every component receives the
/// [`RouterContext`] of the provider it is rendered under.
pub trait Component {
	/// Renders the component against the current router state.
	fn render(&self, router: &RouterContext) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}

fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_render_element_with_attrs() {
		let view = View::element("h1")
			.attr("class", "title")
			.child("Hello People")
			.into_view();
		assert_eq!(view.render_to_string(), "<h1 class=\"title\">Hello People</h1>");
	}

	#[rstest]
	fn test_render_void_element() {
		let view = View::element("br").into_view();
		assert_eq!(view.render_to_string(), "<br />");
	}

	#[rstest]
	fn test_render_escapes() {
		let view = View::element("a")
			.attr("href", "/?a=1&b=\"2\"")
			.child("<script>")
			.into_view();
		assert_eq!(
			view.render_to_string(),
			"<a href=\"/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;</a>"
		);
	}

	#[rstest]
	fn test_empty_renders_nothing() {
		assert_eq!(View::empty().render_to_string(), "");
		assert!(View::fragment(vec![View::Empty, View::Empty]).is_empty());
		assert!(!View::text("x").is_empty());
	}

	#[rstest]
	fn test_find_element_and_click() {
		let clicks = Rc::new(Cell::new(0));
		let handler: ClickHandler = {
			let clicks = Rc::clone(&clicks);
			Rc::new(move |event: &mut ActivationEvent| {
				event.prevent_default();
				clicks.set(clicks.get() + 1);
			})
		};
		let view = View::element("nav")
			.child(View::element("a").attr("data-to", "people").on_click(handler))
			.into_view();

		let link = view.find_element("data-to", "people").unwrap();
		let event = link.click();
		assert!(event.is_default_prevented());
		assert_eq!(clicks.get(), 1);
		assert!(view.find_element("data-to", "hello").is_none());
	}

	#[rstest]
	fn test_click_without_handler() {
		let el = ElementView::new("a");
		assert!(!el.click().is_default_prevented());
	}

	#[rstest]
	fn test_text_content() {
		let view = (
			View::element("h1").child("Hello"),
			" ",
			View::element("p").child("World"),
		)
			.into_view();
		assert_eq!(view.text_content(), "Hello World");
	}
}
