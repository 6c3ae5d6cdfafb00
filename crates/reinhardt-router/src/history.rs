//! Navigation history backends.
//!
//! The router depends on a small contract: read the current [`Location`],
//! [`listen`](History::listen) for changes, and [`push`](History::push) new
//! entries. Any backend satisfying [`History`] can drive a provider.
//!
//! - [`MemoryHistory`]: an in-process entry stack, used natively and in tests.
//! - `BrowserHistory` (wasm32 only): the browser History API.
//!
//! [`shared_history`] hands out the per-thread singleton for the current
//! target.

use crate::error::RouterError;
use crate::location::Location;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use url::Url;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

/// How a location change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry was pushed.
	Push,
	/// The current entry was replaced.
	Replace,
	/// The user moved through existing entries, or the fragment changed.
	Pop,
}

/// Callback invoked on every location change.
pub type HistoryListener = Rc<dyn Fn(&Location, NavigationType)>;

/// A shared, dynamically dispatched history backend.
pub type SharedHistory = Rc<dyn History>;

/// The navigation history contract the router depends on.
pub trait History {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Registers a change listener.
	///
	/// The listener stays registered until the returned guard is dropped
	/// or [`Unlisten::unlisten`] is called.
	fn listen(&self, listener: HistoryListener) -> Unlisten;

	/// Pushes a new entry, resolving `url` against the current location.
	///
	/// Listeners are notified synchronously, exactly once, before this
	/// returns.
	fn push(&self, url: &str) -> Result<(), RouterError>;

	/// Replaces the current entry, resolving `url` against the current location.
	fn replace(&self, url: &str) -> Result<(), RouterError>;

	/// Performs a full document navigation to `url`.
	///
	/// Unlike [`push`](History::push) this goes through the document
	/// location, exactly like assigning `window.location.href`.
	fn assign(&self, url: &str) -> Result<(), RouterError>;
}

/// Guard returned by [`History::listen`]. Dropping it unsubscribes.
#[must_use = "dropping the guard immediately unsubscribes the listener"]
pub struct Unlisten {
	release: Option<Box<dyn FnOnce()>>,
}

impl Unlisten {
	fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// Unsubscribes the listener now.
	pub fn unlisten(mut self) {
		self.release_now();
	}

	fn release_now(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl Drop for Unlisten {
	fn drop(&mut self) {
		self.release_now();
	}
}

impl std::fmt::Debug for Unlisten {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Unlisten")
			.field("active", &self.release.is_some())
			.finish()
	}
}

/// Listener registry shared by the history backends.
#[derive(Default)]
pub(crate) struct Listeners {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(u64, HistoryListener)>>,
}

impl Listeners {
	pub(crate) fn add(self: &Rc<Self>, listener: HistoryListener) -> Unlisten {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.entries.borrow_mut().push((id, listener));

		let registry: Weak<Self> = Rc::downgrade(self);
		Unlisten::new(move || {
			if let Some(registry) = registry.upgrade() {
				registry.entries.borrow_mut().retain(|(entry, _)| *entry != id);
			}
		})
	}

	pub(crate) fn notify(&self, location: &Location, nav_type: NavigationType) {
		// Snapshot first: listeners may push or unlisten while being notified.
		let listeners: Vec<HistoryListener> = self
			.entries
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			listener(location, nav_type);
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.borrow().len()
	}
}

/// Resolves `target` against `base` the way a browser resolves an `href`.
pub(crate) fn resolve(base: &Url, target: &str) -> Result<Url, RouterError> {
	base.join(target).map_err(|e| RouterError::InvalidUrl {
		url: target.to_string(),
		reason: e.to_string(),
	})
}

/// In-memory history with browser-like resolution rules.
///
/// Cloning shares the same entry stack and listeners.
///
/// # Example
///
/// ```
/// use reinhardt_router::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("http://localhost/app/").unwrap();
/// history.push("#/people").unwrap();
/// assert_eq!(history.location().pathname, "/app/");
/// assert_eq!(history.location().hash, "#/people");
/// ```
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<MemoryInner>,
}

struct MemoryInner {
	entries: RefCell<Vec<Url>>,
	index: Cell<usize>,
	assigned: RefCell<Vec<String>>,
	listeners: Rc<Listeners>,
}

impl MemoryHistory {
	/// Creates a history whose only entry is the absolute URL `initial`.
	pub fn new(initial: &str) -> Result<Self, RouterError> {
		let url = Url::parse(initial).map_err(|e| RouterError::InvalidUrl {
			url: initial.to_string(),
			reason: e.to_string(),
		})?;
		Ok(Self::from_url(url))
	}

	fn from_url(url: Url) -> Self {
		Self {
			inner: Rc::new(MemoryInner {
				entries: RefCell::new(vec![url]),
				index: Cell::new(0),
				assigned: RefCell::new(Vec::new()),
				listeners: Rc::new(Listeners::default()),
			}),
		}
	}

	/// Returns the current entry as an absolute URL.
	pub fn current_url(&self) -> Url {
		self.inner.entries.borrow()[self.inner.index.get()].clone()
	}

	/// Returns the number of entries in the stack. Never zero.
	pub fn entry_count(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.inner.listeners.len()
	}

	/// Returns every URL passed to [`History::assign`], in order.
	pub fn assigned(&self) -> Vec<String> {
		self.inner.assigned.borrow().clone()
	}

	/// Returns how many full document navigations were requested.
	pub fn assign_count(&self) -> usize {
		self.inner.assigned.borrow().len()
	}

	/// Moves one entry back. Returns `false` at the start of the stack.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `false` at the end of the stack.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries through the stack, notifying listeners with
	/// [`NavigationType::Pop`]. Out-of-range moves do nothing.
	pub fn go(&self, delta: isize) -> bool {
		let len = self.entry_count() as isize;
		let Some(target) = (self.inner.index.get() as isize).checked_add(delta) else {
			return false;
		};
		if delta == 0 || target < 0 || target >= len {
			return false;
		}
		self.inner.index.set(target as usize);
		self.inner
			.listeners
			.notify(&self.location(), NavigationType::Pop);
		true
	}

	fn push_entry(&self, url: Url) {
		let mut entries = self.inner.entries.borrow_mut();
		let next = self.inner.index.get() + 1;
		entries.truncate(next);
		entries.push(url);
		self.inner.index.set(next);
	}
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("current", &self.current_url().as_str())
			.field("entries", &self.entry_count())
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Location {
		Location::from(&self.current_url())
	}

	fn listen(&self, listener: HistoryListener) -> Unlisten {
		self.inner.listeners.add(listener)
	}

	fn push(&self, url: &str) -> Result<(), RouterError> {
		let resolved = resolve(&self.current_url(), url)?;
		self.push_entry(resolved);
		self.inner
			.listeners
			.notify(&self.location(), NavigationType::Push);
		Ok(())
	}

	fn replace(&self, url: &str) -> Result<(), RouterError> {
		let resolved = resolve(&self.current_url(), url)?;
		self.inner.entries.borrow_mut()[self.inner.index.get()] = resolved;
		self.inner
			.listeners
			.notify(&self.location(), NavigationType::Replace);
		Ok(())
	}

	fn assign(&self, url: &str) -> Result<(), RouterError> {
		let current = self.current_url();
		let resolved = resolve(&current, url)?;
		self.inner.assigned.borrow_mut().push(url.to_string());
		if resolved == current {
			return Ok(());
		}

		// A fragment-only change keeps the document and fires popstate.
		// Anything else reloads the document, so nobody is left to notify.
		let mut without_fragment = resolved.clone();
		without_fragment.set_fragment(current.fragment());
		let fragment_only = without_fragment == current;

		self.push_entry(resolved);
		if fragment_only {
			self.inner
				.listeners
				.notify(&self.location(), NavigationType::Pop);
		}
		Ok(())
	}
}

/// Initial location of the native history singleton.
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MEMORY_URL: &str = "http://localhost/";

thread_local! {
	static SHARED_HISTORY: RefCell<Option<SharedHistory>> = const { RefCell::new(None) };
}

/// Returns the per-thread navigation history singleton.
///
/// On wasm32 this wraps the browser History API; elsewhere it is a
/// [`MemoryHistory`] starting at `http://localhost/`.
pub fn shared_history() -> Result<SharedHistory, RouterError> {
	SHARED_HISTORY.with(|cell| {
		if let Some(history) = cell.borrow().as_ref() {
			return Ok(Rc::clone(history));
		}
		let history = create_platform_history()?;
		*cell.borrow_mut() = Some(Rc::clone(&history));
		Ok(history)
	})
}

#[cfg(target_arch = "wasm32")]
fn create_platform_history() -> Result<SharedHistory, RouterError> {
	Ok(Rc::new(BrowserHistory::new()?))
}

#[cfg(not(target_arch = "wasm32"))]
fn create_platform_history() -> Result<SharedHistory, RouterError> {
	Ok(Rc::new(MemoryHistory::new(DEFAULT_MEMORY_URL)?))
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{History, HistoryListener, Listeners, NavigationType, Unlisten};
	use crate::error::RouterError;
	use crate::location::Location;
	use std::rc::Rc;
	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;

	/// History backend built on `window.history` and `popstate`.
	pub struct BrowserHistory {
		window: web_sys::Window,
		listeners: Rc<Listeners>,
		popstate: Closure<dyn FnMut(web_sys::Event)>,
	}

	impl BrowserHistory {
		/// Attaches to the current window.
		pub fn new() -> Result<Self, RouterError> {
			let window = web_sys::window()
				.ok_or_else(|| RouterError::HistoryUnavailable("no global window".to_string()))?;
			let listeners = Rc::new(Listeners::default());

			let popstate = {
				let window = window.clone();
				let listeners = Rc::clone(&listeners);
				Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
					listeners.notify(&read_location(&window), NavigationType::Pop);
				})
			};
			window
				.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
				.map_err(|e| RouterError::HistoryUnavailable(format!("{:?}", e)))?;

			Ok(Self {
				window,
				listeners,
				popstate,
			})
		}

		fn history(&self) -> Result<web_sys::History, RouterError> {
			self.window
				.history()
				.map_err(|e| RouterError::HistoryUnavailable(format!("{:?}", e)))
		}
	}

	impl Drop for BrowserHistory {
		fn drop(&mut self) {
			let _ = self.window.remove_event_listener_with_callback(
				"popstate",
				self.popstate.as_ref().unchecked_ref(),
			);
		}
	}

	fn read_location(window: &web_sys::Window) -> Location {
		let location = window.location();
		Location {
			pathname: location.pathname().unwrap_or_default(),
			search: location.search().unwrap_or_default(),
			hash: location.hash().unwrap_or_default(),
		}
	}

	impl History for BrowserHistory {
		fn location(&self) -> Location {
			read_location(&self.window)
		}

		fn listen(&self, listener: HistoryListener) -> Unlisten {
			self.listeners.add(listener)
		}

		fn push(&self, url: &str) -> Result<(), RouterError> {
			self.history()?
				.push_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))?;
			// pushState never fires popstate, so notify directly.
			self.listeners
				.notify(&self.location(), NavigationType::Push);
			Ok(())
		}

		fn replace(&self, url: &str) -> Result<(), RouterError> {
			self.history()?
				.replace_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))?;
			self.listeners
				.notify(&self.location(), NavigationType::Replace);
			Ok(())
		}

		fn assign(&self, url: &str) -> Result<(), RouterError> {
			self.window
				.location()
				.set_href(url)
				.map_err(|e| RouterError::NavigationFailed(format!("{:?}", e)))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn history() -> MemoryHistory {
		MemoryHistory::new("http://localhost/app/").unwrap()
	}

	fn recorder(history: &MemoryHistory) -> (Rc<RefCell<Vec<(String, NavigationType)>>>, Unlisten) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		let guard = history.listen(Rc::new(move |location: &Location, nav: NavigationType| {
			sink.borrow_mut().push((location.href(), nav));
		}));
		(seen, guard)
	}

	#[rstest]
	fn test_push_resolves_relative_urls(history: MemoryHistory) {
		history.push("people").unwrap();
		assert_eq!(history.location().pathname, "/app/people");

		history.push("/other?x=1").unwrap();
		assert_eq!(history.location(), Location::new("/other", "?x=1", ""));

		history.push("#/hash").unwrap();
		assert_eq!(history.location(), Location::new("/other", "?x=1", "#/hash"));
		assert_eq!(history.entry_count(), 4);
	}

	#[rstest]
	fn test_push_notifies_once(history: MemoryHistory) {
		let (seen, _guard) = recorder(&history);
		history.push("#/people").unwrap();

		let seen = seen.borrow();
		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0], ("/app/#/people".to_string(), NavigationType::Push));
	}

	#[rstest]
	fn test_unlisten_on_drop(history: MemoryHistory) {
		let (seen, guard) = recorder(&history);
		assert_eq!(history.listener_count(), 1);
		drop(guard);
		assert_eq!(history.listener_count(), 0);

		history.push("people").unwrap();
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	fn test_explicit_unlisten(history: MemoryHistory) {
		let (_seen, guard) = recorder(&history);
		guard.unlisten();
		assert_eq!(history.listener_count(), 0);
	}

	#[rstest]
	fn test_replace_keeps_length(history: MemoryHistory) {
		let (seen, _guard) = recorder(&history);
		history.replace("people").unwrap();
		assert_eq!(history.entry_count(), 1);
		assert_eq!(seen.borrow()[0].1, NavigationType::Replace);
	}

	#[rstest]
	fn test_back_and_forward(history: MemoryHistory) {
		history.push("a").unwrap();
		history.push("b").unwrap();
		let (seen, _guard) = recorder(&history);

		assert!(history.back());
		assert_eq!(history.location().pathname, "/app/a");
		assert!(history.forward());
		assert_eq!(history.location().pathname, "/app/b");
		assert!(!history.forward());
		assert_eq!(seen.borrow().len(), 2);
		assert!(seen.borrow().iter().all(|(_, nav)| *nav == NavigationType::Pop));
	}

	#[rstest]
	fn test_push_after_back_truncates(history: MemoryHistory) {
		history.push("a").unwrap();
		history.push("b").unwrap();
		history.back();
		history.push("c").unwrap();
		assert_eq!(history.entry_count(), 3);
		assert!(!history.forward());
	}

	#[rstest]
	fn test_assign_fragment_only_notifies_pop(history: MemoryHistory) {
		let (seen, _guard) = recorder(&history);
		history.assign("/app/#/").unwrap();

		assert_eq!(history.assign_count(), 1);
		assert_eq!(history.location().hash, "#/");
		assert_eq!(seen.borrow().len(), 1);
		assert_eq!(seen.borrow()[0].1, NavigationType::Pop);
	}

	#[rstest]
	fn test_assign_current_url_is_silent(history: MemoryHistory) {
		history.push("#/people").unwrap();
		let (seen, _guard) = recorder(&history);
		history.assign("/app/#/people").unwrap();

		assert_eq!(history.assign_count(), 1);
		assert_eq!(history.entry_count(), 2);
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	#[case(isize::MAX)]
	#[case(isize::MIN)]
	#[case(2)]
	#[case(-3)]
	fn test_go_out_of_range_does_nothing(history: MemoryHistory, #[case] delta: isize) {
		history.push("a").unwrap();
		let (seen, _guard) = recorder(&history);

		assert!(!history.go(delta));
		assert_eq!(history.location().pathname, "/app/a");
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	fn test_assign_other_document_is_silent(history: MemoryHistory) {
		let (seen, _guard) = recorder(&history);
		history.assign("/#/").unwrap();

		assert_eq!(history.assigned(), vec!["/#/".to_string()]);
		assert_eq!(history.location(), Location::new("/", "", "#/"));
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	fn test_listener_may_unlisten_during_notify(history: MemoryHistory) {
		let slot: Rc<RefCell<Option<Unlisten>>> = Rc::new(RefCell::new(None));
		let calls = Rc::new(Cell::new(0));
		let guard = {
			let slot = Rc::clone(&slot);
			let calls = Rc::clone(&calls);
			history.listen(Rc::new(move |_: &Location, _: NavigationType| {
				calls.set(calls.get() + 1);
				slot.borrow_mut().take();
			}))
		};
		*slot.borrow_mut() = Some(guard);

		history.push("a").unwrap();
		history.push("b").unwrap();
		assert_eq!(calls.get(), 1);
		assert_eq!(history.listener_count(), 0);
	}

	#[rstest]
	fn test_invalid_initial_url() {
		let result = MemoryHistory::new("not a url");
		assert!(matches!(result, Err(RouterError::InvalidUrl { .. })));
	}

	#[rstest]
	fn test_shared_history_is_singleton() {
		let first = shared_history().unwrap();
		let second = shared_history().unwrap();
		assert!(Rc::ptr_eq(&first, &second));
	}
}
