use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

use crate::TagfillError;
use crate::TagfillResult;

/// Default start marker.
pub const DEFAULT_START_TAG: &str = "{";
/// Default end marker.
pub const DEFAULT_END_TAG: &str = "}";

/// The pair of markers that delimit a placeholder, e.g. `{` and `}`.
///
/// ```toml
/// [tags]
/// start = "<<"
/// end = ">>"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tags {
	#[serde(default = "default_start")]
	pub start: String,
	#[serde(default = "default_end")]
	pub end: String,
}

fn default_start() -> String {
	DEFAULT_START_TAG.to_string()
}

fn default_end() -> String {
	DEFAULT_END_TAG.to_string()
}

impl Default for Tags {
	fn default() -> Self {
		Self {
			start: default_start(),
			end: default_end(),
		}
	}
}

impl Tags {
	pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			start: start.into(),
			end: end.into(),
		}
	}

	/// Like [`Tags::new`] but rejects empty markers. Templates accept any
	/// pair, so this is only needed where a user supplies the tags.
	pub fn try_new(start: impl Into<String>, end: impl Into<String>) -> TagfillResult<Self> {
		let tags = Self::new(start, end);
		if tags.is_empty() {
			return Err(TagfillError::InvalidTags {
				start: tags.start,
				end: tags.end,
			});
		}

		Ok(tags)
	}

	/// True when either marker is empty. Such a pair never matches anything.
	pub fn is_empty(&self) -> bool {
		self.start.is_empty() || self.end.is_empty()
	}

	/// Wrap a bare name in the markers: `name` becomes `{name}`.
	pub fn wrap(&self, name: &str) -> String {
		let mut span = String::with_capacity(self.start.len() + name.len() + self.end.len());
		span.push_str(&self.start);
		span.push_str(name);
		span.push_str(&self.end);
		span
	}

	/// Strip the markers from a span: `{name}` becomes `name`. Returns the
	/// span unchanged when it isn't wrapped in these markers.
	pub fn strip<'a>(&self, span: &'a str) -> &'a str {
		span.strip_prefix(self.start.as_str())
			.and_then(|rest| rest.strip_suffix(self.end.as_str()))
			.unwrap_or(span)
	}

	pub(crate) fn start_char(&self) -> Option<char> {
		self.start.chars().next()
	}

	pub(crate) fn end_char(&self) -> Option<char> {
		self.end.chars().next()
	}
}

impl Display for Tags {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}…{}", self.start, self.end)
	}
}

impl<S, E> From<(S, E)> for Tags
where
	S: Into<String>,
	E: Into<String>,
{
	fn from((start, end): (S, E)) -> Self {
		Self::new(start, end)
	}
}
