//! Router state provider.
//!
//! A [`RouterProvider`] owns the subscription to a navigation history and
//! is the only writer of the router state. Everything rendered beneath it
//! reads that state through a [`RouterContext`], a cheap shared handle that
//! is passed down explicitly.
//!
//! ## Lifecycle
//!
//! 1. Mount: in hash mode, a location without a fragment is redirected once
//!    to `basename + "#/"`. The initial [`RouteDescriptor`] is then read and a
//!    history listener registered.
//! 2. Every history change replaces the descriptor wholesale, bumps the
//!    revision and notifies subscribers.
//! 3. Unmount (drop): the history listener is released. This happens on
//!    every exit path, including unwinding, because it is tied to `Drop`.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use reinhardt_router::{History, MemoryHistory, RouterProvider};
//!
//! let history = MemoryHistory::new("http://localhost/").unwrap();
//! let provider = RouterProvider::hash(Rc::new(history.clone()), "/").unwrap();
//! let router = provider.context();
//!
//! assert_eq!(router.route().hash, "#/");
//! history.push("#/people").unwrap();
//! assert_eq!(router.route().hash, "#/people");
//! assert_eq!(router.revision(), 1);
//! ```

use crate::config::{RouterConfig, RouterMode};
use crate::error::RouterError;
use crate::history::{History, NavigationType, SharedHistory, Unlisten, shared_history};
use crate::link::Navigation;
use crate::location::{Location, RouteDescriptor};
use crate::url::join_url;
use crate::{debug_log, info_log};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Snapshot of the router state visible to routes and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterState {
	/// Provider configuration, fixed at mount.
	pub config: RouterConfig,
	/// The current route descriptor.
	pub route: RouteDescriptor,
}

/// Outcome of the hash-mode mount check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
	/// The location already had a fragment, or the provider is in path mode.
	NotNeeded,
	/// A full navigation to the contained URL was performed.
	Redirected(String),
}

type Subscriber = Rc<dyn Fn(&RouterState)>;

struct RouterShared {
	config: RouterConfig,
	history: SharedHistory,
	route: RefCell<RouteDescriptor>,
	revision: Cell<u64>,
	mounted: Cell<bool>,
	next_subscriber: Cell<u64>,
	subscribers: RefCell<Vec<(u64, Subscriber)>>,
}

impl RouterShared {
	fn publish(&self, route: RouteDescriptor, nav_type: NavigationType) {
		debug_log!("Route changed ({:?}): {:?}", nav_type, route);
		*self.route.borrow_mut() = route;
		self.revision.set(self.revision.get() + 1);

		let state = self.state();
		let subscribers: Vec<Subscriber> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, s)| Rc::clone(s))
			.collect();
		for subscriber in subscribers {
			subscriber(&state);
		}
	}

	fn state(&self) -> RouterState {
		RouterState {
			config: self.config.clone(),
			route: self.route.borrow().clone(),
		}
	}
}

/// Owner of the router state and of its history subscription.
pub struct RouterProvider {
	context: RouterContext,
	bootstrap: Bootstrap,
	unlisten: Option<Unlisten>,
}

impl RouterProvider {
	/// Mounts a provider on `history` with the given configuration.
	pub fn new(history: SharedHistory, config: RouterConfig) -> Result<Self, RouterError> {
		let bootstrap = match config.mode {
			RouterMode::Hash if history.location().hash.is_empty() => {
				let target = join_url([config.basename.as_str(), "#/"]);
				info_log!("No fragment in location, redirecting to {}", target);
				history.assign(&target)?;
				Bootstrap::Redirected(target)
			}
			_ => Bootstrap::NotNeeded,
		};

		let route = RouteDescriptor::from_location(&history.location());
		let shared = Rc::new(RouterShared {
			config,
			history: Rc::clone(&history),
			route: RefCell::new(route),
			revision: Cell::new(0),
			mounted: Cell::new(true),
			next_subscriber: Cell::new(0),
			subscribers: RefCell::new(Vec::new()),
		});

		let weak: Weak<RouterShared> = Rc::downgrade(&shared);
		let unlisten = history.listen(Rc::new(
			move |location: &Location, nav_type: NavigationType| {
				if let Some(shared) = weak.upgrade() {
					shared.publish(RouteDescriptor::from_location(location), nav_type);
				}
			},
		));

		info_log!(
			"Router mounted (mode: {}, basename: {})",
			shared.config.mode,
			shared.config.basename
		);

		Ok(Self {
			context: RouterContext { shared },
			bootstrap,
			unlisten: Some(unlisten),
		})
	}

	/// Mounts a path-mode provider.
	pub fn browser(history: SharedHistory, basename: impl Into<String>) -> Result<Self, RouterError> {
		Self::new(
			history,
			RouterConfig::new(RouterMode::Path).with_basename(basename),
		)
	}

	/// Mounts a hash-mode provider.
	pub fn hash(history: SharedHistory, basename: impl Into<String>) -> Result<Self, RouterError> {
		Self::new(
			history,
			RouterConfig::new(RouterMode::Hash).with_basename(basename),
		)
	}

	/// Mounts a provider on the per-thread history singleton.
	pub fn with_shared_history(config: RouterConfig) -> Result<Self, RouterError> {
		Self::new(shared_history()?, config)
	}

	/// Returns a handle for routes and links rendered under this provider.
	pub fn context(&self) -> RouterContext {
		self.context.clone()
	}

	/// Returns what the mount-time hash check did.
	pub fn bootstrap(&self) -> &Bootstrap {
		&self.bootstrap
	}

	/// Unmounts the provider, releasing its history listener.
	pub fn unmount(self) {
		drop(self);
	}
}

impl Drop for RouterProvider {
	fn drop(&mut self) {
		if let Some(unlisten) = self.unlisten.take() {
			unlisten.unlisten();
		}
		self.context.shared.mounted.set(false);
		info_log!("Router unmounted");
	}
}

impl std::fmt::Debug for RouterProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterProvider")
			.field("context", &self.context)
			.field("bootstrap", &self.bootstrap)
			.finish()
	}
}

/// Read-only handle to a provider's state.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone)]
pub struct RouterContext {
	shared: Rc<RouterShared>,
}

impl RouterContext {
	/// Returns the provider configuration.
	pub fn config(&self) -> &RouterConfig {
		&self.shared.config
	}

	/// Returns the routing mode.
	pub fn mode(&self) -> RouterMode {
		self.shared.config.mode
	}

	/// Returns the basename.
	pub fn basename(&self) -> &str {
		&self.shared.config.basename
	}

	/// Returns the current route descriptor.
	pub fn route(&self) -> RouteDescriptor {
		self.shared.route.borrow().clone()
	}

	/// Returns a snapshot of the full router state.
	pub fn state(&self) -> RouterState {
		self.shared.state()
	}

	/// Returns how many route updates happened since mount.
	pub fn revision(&self) -> u64 {
		self.shared.revision.get()
	}

	/// Returns `false` once the owning provider has been dropped.
	pub fn is_mounted(&self) -> bool {
		self.shared.mounted.get()
	}

	/// Returns the history this provider listens to.
	pub fn history(&self) -> SharedHistory {
		Rc::clone(&self.shared.history)
	}

	/// Returns the location string routes and links compare against:
	/// the fragment in hash mode, the path in path mode.
	pub fn current_url(&self) -> String {
		let route = self.shared.route.borrow();
		match self.mode() {
			RouterMode::Hash => route.hash.clone(),
			RouterMode::Path => route.path.clone(),
		}
	}

	/// Computes the URL a link to `to` pushes.
	pub fn target_url(&self, to: &str) -> String {
		match self.mode() {
			RouterMode::Hash => join_url(["#", to]),
			RouterMode::Path => join_url([self.basename(), to]),
		}
	}

	/// Navigates to `to` unless it is already the current location.
	pub fn navigate(&self, to: &str) -> Result<Navigation, RouterError> {
		let target = self.target_url(to);
		if target == self.current_url() {
			debug_log!("Navigation to {} is a no-op", target);
			return Ok(Navigation::NoOp);
		}
		self.shared.history.push(&target)?;
		Ok(Navigation::Navigated(target))
	}

	/// Calls `f` with the new state after every route change.
	pub fn subscribe(&self, f: impl Fn(&RouterState) + 'static) -> Subscription {
		let id = self.shared.next_subscriber.get();
		self.shared.next_subscriber.set(id + 1);
		self.shared
			.subscribers
			.borrow_mut()
			.push((id, Rc::new(f)));
		Subscription {
			shared: Rc::downgrade(&self.shared),
			id,
		}
	}
}

impl std::fmt::Debug for RouterContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterContext")
			.field("config", &self.shared.config)
			.field("route", &self.shared.route.borrow())
			.field("revision", &self.revision())
			.field("mounted", &self.is_mounted())
			.finish()
	}
}

/// Guard returned by [`RouterContext::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping the subscription immediately unsubscribes"]
#[derive(Debug)]
pub struct Subscription {
	shared: Weak<RouterShared>,
	id: u64,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(shared) = self.shared.upgrade() {
			shared
				.subscribers
				.borrow_mut()
				.retain(|(id, _)| *id != self.id);
		}
	}
}

/// Reads the router state, mirroring a `useRouter()` hook.
pub fn use_router(router: &RouterContext) -> RouterState {
	router.state()
}
