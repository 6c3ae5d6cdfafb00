//! Location snapshots.
//!
//! [`Location`] is the raw shape the navigation history hands out;
//! [`RouteDescriptor`] is the normalized form routes and links read.

use crate::url::{QueryParams, parse_query};
use serde::{Deserialize, Serialize};
use url::Url;

/// The current location as reported by a navigation history.
///
/// Mirrors `window.location`: `search` keeps its leading `?` and `hash`
/// keeps its leading `#`; both are empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	/// The path component, e.g. `/app/people`.
	pub pathname: String,
	/// The query component including `?`, or empty.
	pub search: String,
	/// The fragment component including `#`, or empty.
	pub hash: String,
}

impl Location {
	/// Creates a location from its three components.
	pub fn new(
		pathname: impl Into<String>,
		search: impl Into<String>,
		hash: impl Into<String>,
	) -> Self {
		Self {
			pathname: pathname.into(),
			search: search.into(),
			hash: hash.into(),
		}
	}

	/// Returns the path, search and hash concatenated.
	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}
}

impl From<&Url> for Location {
	fn from(url: &Url) -> Self {
		Self {
			pathname: url.path().to_string(),
			search: url
				.query()
				.filter(|q| !q.is_empty())
				.map(|q| format!("?{}", q))
				.unwrap_or_default(),
			hash: url
				.fragment()
				.filter(|f| !f.is_empty())
				.map(|f| format!("#{}", f))
				.unwrap_or_default(),
		}
	}
}

/// Normalized snapshot of the current location.
///
/// Replaced wholesale on every navigation; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
	/// The location path.
	pub path: String,
	/// The location fragment, including its leading `#`.
	pub hash: String,
	/// Query parameters parsed from the location search string.
	pub query: QueryParams,
}

impl RouteDescriptor {
	/// Builds a descriptor from a history location.
	///
	/// `query` is empty when the location has no search string.
	pub fn from_location(location: &Location) -> Self {
		Self {
			path: location.pathname.clone(),
			hash: location.hash.clone(),
			query: if location.search.is_empty() {
				QueryParams::new()
			} else {
				parse_query(&location.search)
			},
		}
	}

	/// Returns a query parameter value, if the key is present with a value.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query.get(key).and_then(|v| v.as_deref())
	}
}

impl From<&Location> for RouteDescriptor {
	fn from(location: &Location) -> Self {
		Self::from_location(location)
	}
}
