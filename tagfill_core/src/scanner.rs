use serde::Serialize;
use tracing::trace;

use crate::Tags;

/// One occurrence of a placeholder in a text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Placeholder {
	/// The literal matched span including markers, e.g. `{name}`.
	pub span: String,
	/// The span with its markers stripped, e.g. `name`.
	pub name: String,
	/// Byte offset of the span's start marker in the scanned text.
	pub offset: usize,
}

impl Placeholder {
	/// Byte offset one past the span's end marker.
	pub fn end(&self) -> usize {
		self.offset + self.span.len()
	}
}

/// Characters allowed between the markers: ASCII letters, digits, `-` and
/// `_`.
pub fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Scan `text` for placeholders delimited by `tags`, left to right and
/// without overlap. Repeated names produce one entry per occurrence.
///
/// A candidate is rejected when the character before its start marker is
/// the start marker's first character, or the character after its end
/// marker is the end marker's first character. With the default tags this
/// keeps `{{name}}` literal.
///
/// Scanning never fails: text without well-formed placeholders, or a tag
/// pair with an empty marker, yields an empty list.
pub fn scan(text: &str, tags: &Tags) -> Vec<Placeholder> {
	let mut placeholders = Vec::new();

	if tags.is_empty() {
		return placeholders;
	}

	let mut search_from = 0;

	while search_from < text.len() {
		let Some(open_offset) = text[search_from..].find(tags.start.as_str()) else {
			break;
		};
		let open = search_from + open_offset;

		if let Some(placeholder) = match_at(text, open, tags) {
			search_from = placeholder.end();
			placeholders.push(placeholder);
			continue;
		}

		// Retry from the next character; markers may overlap a failed
		// candidate.
		let step = text[open..].chars().next().map_or(1, char::len_utf8);
		search_from = open + step;
	}

	trace!(count = placeholders.len(), "scanned placeholders");
	placeholders
}

/// Scan and keep only the literal spans.
pub fn scan_spans(text: &str, tags: &Tags) -> Vec<String> {
	scan(text, tags)
		.into_iter()
		.map(|placeholder| placeholder.span)
		.collect()
}

/// Try to match a placeholder whose start marker begins at byte `open`. The
/// interior is the shortest run of name characters that is followed by an
/// unguarded end marker.
fn match_at(text: &str, open: usize, tags: &Tags) -> Option<Placeholder> {
	if text[..open].chars().next_back() == tags.start_char() {
		return None;
	}

	let after_open = open + tags.start.len();
	let end_char = tags.end_char();
	let mut cursor = after_open;

	loop {
		if cursor > after_open && text[cursor..].starts_with(tags.end.as_str()) {
			let close_end = cursor + tags.end.len();
			if text[close_end..].chars().next() != end_char {
				return Some(Placeholder {
					span: text[open..close_end].to_string(),
					name: text[after_open..cursor].to_string(),
					offset: open,
				});
			}
		}

		let next = text[cursor..].chars().next()?;
		if !is_name_char(next) {
			return None;
		}

		cursor += next.len_utf8();
	}
}
