//! Navigation links.
//!
//! A [`Link`] renders an anchor whose activation is intercepted: the
//! browser's own navigation is suppressed and the router's history is pushed
//! instead. Activating a link that points at the current location does
//! nothing at all.

use crate::error::RouterError;
use crate::provider::RouterContext;
use crate::route::ViewFactory;
use crate::view::{ActivationEvent, ClickHandler, Component, IntoView, View};
use crate::{debug_log, error_log, info_log};
use std::borrow::Cow;
use std::rc::Rc;

/// Callback invoked before a link navigates.
pub type LinkCallback = Rc<dyn Fn(&ActivationEvent)>;

/// Result of activating a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
	/// The history was pushed to the contained URL.
	Navigated(String),
	/// The target equals the current location; nothing happened.
	NoOp,
}

/// An anchor that navigates through the router.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use reinhardt_router::{Component, Link, MemoryHistory, RouterProvider};
///
/// let history = MemoryHistory::new("http://localhost/#/").unwrap();
/// let provider = RouterProvider::hash(Rc::new(history), "/").unwrap();
/// let view = Link::new("people", || "People").render(&provider.context());
///
/// assert_eq!(
///     view.render_to_string(),
///     "<a href=\"#/people\" data-link=\"true\" data-to=\"people\">People</a>"
/// );
/// ```
#[derive(Clone)]
pub struct Link {
	to: String,
	content: ViewFactory,
	on_click: Option<LinkCallback>,
	class: Option<String>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl std::fmt::Debug for Link {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Link")
			.field("to", &self.to)
			.field("class", &self.class)
			.field("attrs", &self.attrs)
			.field("has_on_click", &self.on_click.is_some())
			.finish()
	}
}

impl Link {
	/// Creates a link to `to`, relative to the basename (or the fragment root
	/// in hash mode).
	pub fn new<F, V>(to: impl Into<String>, content: F) -> Self
	where
		F: Fn() -> V + 'static,
		V: IntoView,
	{
		Self {
			to: to.into(),
			content: Rc::new(move || content().into_view()),
			on_click: None,
			class: None,
			attrs: Vec::new(),
		}
	}

	/// Sets a callback run on activation, before the history is pushed.
	/// It is not run when the link points at the current location.
	pub fn on_click(mut self, callback: impl Fn(&ActivationEvent) + 'static) -> Self {
		self.on_click = Some(Rc::new(callback));
		self
	}

	/// Sets the anchor's `class` attribute.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Adds an attribute to the anchor.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the declared target.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the URL this link pushes under `router`.
	pub fn href(&self, router: &RouterContext) -> String {
		router.target_url(&self.to)
	}

	/// Handles an activation of this link.
	///
	/// The event's default is always prevented. When the target differs from
	/// the current location, the user callback runs and the target is pushed.
	pub fn activate(
		&self,
		router: &RouterContext,
		event: &mut ActivationEvent,
	) -> Result<Navigation, RouterError> {
		event.prevent_default();

		let target = self.href(router);
		if target == router.current_url() {
			debug_log!("Link to {} points at the current location", target);
			return Ok(Navigation::NoOp);
		}

		if let Some(callback) = &self.on_click {
			callback(event);
		}
		router.history().push(&target)?;
		info_log!("Navigated to {}", target);
		Ok(Navigation::Navigated(target))
	}
}

impl Component for Link {
	fn render(&self, router: &RouterContext) -> View {
		let handler: ClickHandler = {
			let link = self.clone();
			let router = router.clone();
			Rc::new(move |event: &mut ActivationEvent| {
				if let Err(e) = link.activate(&router, event) {
					error_log!("Link activation failed: {}", e);
				}
			})
		};

		let mut anchor = View::element("a")
			.attr("href", self.href(router))
			.attr("data-link", "true")
			.attr("data-to", self.to.clone());
		if let Some(class) = &self.class {
			anchor = anchor.attr("class", class.clone());
		}
		for (name, value) in &self.attrs {
			anchor = anchor.attr(name.clone(), value.clone());
		}
		anchor.on_click(handler).child((self.content)()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}
