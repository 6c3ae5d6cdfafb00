//! URL string helpers.
//!
//! Small, allocation-light functions shared by the location snapshot,
//! the route matcher and navigation links. None of them fail: malformed
//! input degrades to the closest sensible value.

use indexmap::IndexMap;
use std::borrow::Cow;

/// Parsed query string parameters, in the order their keys first appeared.
///
/// A key written without `=` (e.g. `?flag`) maps to `None`.
pub type QueryParams = IndexMap<String, Option<String>>;

/// Parses query parameters out of a search string.
///
/// Everything up to and including the first `?` is discarded, the rest is
/// split on `&`, and each piece is split on its first `=`. Values are
/// percent-decoded; a value that does not decode to UTF-8 is kept verbatim.
/// When a key repeats, the last occurrence wins.
///
/// # Example
///
/// ```
/// use reinhardt_router::parse_query;
///
/// let query = parse_query("?a=1&b=hello%20world&flag");
/// assert_eq!(query["a"], Some("1".to_string()));
/// assert_eq!(query["b"], Some("hello world".to_string()));
/// assert_eq!(query["flag"], None);
/// ```
pub fn parse_query(search: &str) -> QueryParams {
	let raw = match search.find('?') {
		Some(pos) => &search[pos + 1..],
		None => search,
	};

	let mut params = QueryParams::new();
	for piece in raw.split('&').filter(|piece| !piece.is_empty()) {
		let (key, value) = match piece.split_once('=') {
			Some((key, value)) => (key, Some(decode_component(value))),
			None => (piece, None),
		};
		params.insert(key.to_string(), value);
	}
	params
}

fn decode_component(value: &str) -> String {
	match urlencoding::decode(value) {
		Ok(decoded) => decoded.into_owned(),
		Err(e) => {
			crate::warn_log!("Keeping undecodable query value {:?}: {}", value, e);
			value.to_string()
		}
	}
}

/// Joins path fragments with `/`, collapsing every run of slashes into one.
///
/// Only pass path fragments: the collapse also rewrites the `//` of an
/// absolute URL such as `https://example.com`.
///
/// # Example
///
/// ```
/// use reinhardt_router::join_url;
///
/// assert_eq!(join_url(["/", "people"]), "/people");
/// assert_eq!(join_url(["/app/", "/#/", "people/1"]), "/app/#/people/1");
/// assert_eq!(join_url(["#", "/"]), "#/");
/// ```
pub fn join_url<I, S>(segments: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut joined = String::new();
	for (i, segment) in segments.into_iter().enumerate() {
		if i > 0 {
			joined.push('/');
		}
		joined.push_str(segment.as_ref());
	}
	collapse_slashes(&joined).into_owned()
}

fn collapse_slashes(s: &str) -> Cow<'_, str> {
	if !s.contains("//") {
		return Cow::Borrowed(s);
	}
	let mut out = String::with_capacity(s.len());
	let mut prev_slash = false;
	for c in s.chars() {
		if c == '/' && prev_slash {
			continue;
		}
		prev_slash = c == '/';
		out.push(c);
	}
	Cow::Owned(out)
}

/// Removes the leading run of characters contained in `chars`.
///
/// `chars` is a plain set of characters, not a pattern. With `None`, leading
/// whitespace is removed.
///
/// # Example
///
/// ```
/// use reinhardt_router::ltrim;
///
/// assert_eq!(ltrim(" /x", Some(" /")), "x");
/// assert_eq!(ltrim("  x ", None), "x ");
/// ```
pub fn ltrim<'a>(s: &'a str, chars: Option<&str>) -> &'a str {
	match chars {
		Some(set) => s.trim_start_matches(|c: char| set.contains(c)),
		None => s.trim_start(),
	}
}
