//! Router configuration.
//!
//! A [`RouterConfig`] is fixed for the lifetime of a provider. It can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! basename = "/app"
//! mode = "hash"
//! ```

use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the current view is encoded in the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
	/// Routes match against the location path (`/app/people`).
	#[default]
	Path,
	/// Routes match against the location fragment (`/app/#/people`).
	Hash,
}

impl RouterMode {
	/// Returns the mode name as used in configuration files.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Path => "path",
			Self::Hash => "hash",
		}
	}
}

impl std::fmt::Display for RouterMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for RouterMode {
	type Err = RouterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"path" | "browser" => Ok(Self::Path),
			"hash" => Ok(Self::Hash),
			other => Err(RouterError::Config(format!(
				"unknown router mode '{}', expected 'path' or 'hash'",
				other
			))),
		}
	}
}

/// Configuration of a router provider.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	/// Prefix applied to every route path.
	pub basename: String,
	/// URL encoding strategy.
	pub mode: RouterMode,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			basename: "/".to_string(),
			mode: RouterMode::Path,
		}
	}
}

impl RouterConfig {
	/// Creates a configuration for the given mode with the default basename.
	pub fn new(mode: RouterMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}

	/// Sets the basename. An empty basename becomes `/`.
	pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
		self.basename = basename.into();
		self.normalize();
		self
	}

	/// Sets the mode.
	pub fn with_mode(mut self, mode: RouterMode) -> Self {
		self.mode = mode;
		self
	}

	/// Parses configuration from a TOML string.
	pub fn from_toml(content: &str) -> Result<Self, RouterError> {
		let mut config: Self =
			toml::from_str(content).map_err(|e| RouterError::Config(e.to_string()))?;
		config.normalize();
		Ok(config)
	}

	/// Loads configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Config`] if the file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RouterError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)
			.map_err(|e| RouterError::Config(format!("{}: {}", path.display(), e)))?;
		Self::from_toml(&content)
	}

	fn normalize(&mut self) {
		if self.basename.is_empty() {
			self.basename = "/".to_string();
		}
	}
}
