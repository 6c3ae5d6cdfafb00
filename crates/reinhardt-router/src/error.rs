//! Error types for client-side routing.

use thiserror::Error;

/// Error type for router operations.
///
/// Most routing outcomes are not errors: an unmatched route renders
/// nothing and a link pointing at the current location does nothing.
/// Those outcomes are reported through [`RouteMatch`](crate::RouteMatch)
/// and [`Navigation`](crate::Navigation) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route was declared as both an index route and a path route.
	#[error("Route declares both `index` and `path` ({path:?}); use one or the other")]
	ConflictingDeclaration {
		/// The path that was supplied alongside `index`.
		path: String,
	},
	/// A URL could not be resolved against the current location.
	#[error("Invalid URL '{url}': {reason}")]
	InvalidUrl {
		/// The URL as supplied by the caller.
		url: String,
		/// Why it was rejected.
		reason: String,
	},
	/// The browser history API is not reachable.
	#[error("History unavailable: {0}")]
	HistoryUnavailable(String),
	/// The history backend rejected a navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// Router configuration could not be loaded.
	#[error("Configuration error: {0}")]
	Config(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::ConflictingDeclaration {
				path: "people".to_string()
			}
			.to_string(),
			"Route declares both `index` and `path` (\"people\"); use one or the other"
		);
		assert_eq!(
			RouterError::NavigationFailed("SecurityError".to_string()).to_string(),
			"Navigation failed: SecurityError"
		);
	}

	#[rstest]
	fn test_invalid_url_display() {
		let err = RouterError::InvalidUrl {
			url: "http://[::1".to_string(),
			reason: "invalid IPv6 address".to_string(),
		};
		assert!(err.to_string().contains("http://[::1"));
		assert!(err.to_string().contains("invalid IPv6 address"));
	}
}
