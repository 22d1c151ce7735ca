use std::collections::BTreeMap;
use std::fmt::Display;

use derive_more::Deref;
use derive_more::DerefMut;
use float_cmp::approx_eq;
use serde::Deserialize;
use serde::Serialize;
use snailquote::unescape;

/// The kind of a replacement value. Every placeholder accepts all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
	String,
	Number,
	Boolean,
}

impl ValueKind {
	pub const ALL: [ValueKind; 3] = [ValueKind::String, ValueKind::Number, ValueKind::Boolean];
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ValueKind::String => write!(f, "string"),
			ValueKind::Number => write!(f, "number"),
			ValueKind::Boolean => write!(f, "boolean"),
		}
	}
}

/// A primitive replacement value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(variant_size_differences)]
pub enum Value {
	Boolean(bool),
	Int(i64),
	Float(f64),
	String(String),
}

impl Eq for Value {}
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Boolean(value), Value::Boolean(other_value)) => value == other_value,
			(Value::Int(value), Value::Int(other_value)) => value == other_value,
			(Value::Float(value), Value::Float(other_value)) => {
				approx_eq!(f64, *value, *other_value, ulps = 2)
			}
			(Value::String(value), Value::String(other_value)) => value == other_value,
			_ => false,
		}
	}
}

impl Value {
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Boolean(_) => ValueKind::Boolean,
			Value::Int(_) | Value::Float(_) => ValueKind::Number,
			Value::String(_) => ValueKind::String,
		}
	}

	/// Interpret a command-line literal.
	///
	/// - `true` / `false` become booleans.
	/// - Integer and decimal syntax (`42`, `-1.5`, `2e3`) become numbers.
	/// - Text wrapped in matching single or double quotes is unquoted and
	///   unescaped, so `"42"` stays a string.
	/// - Anything else is taken as a raw string.
	pub fn parse_literal(text: &str) -> Self {
		match text {
			"true" => return Value::Boolean(true),
			"false" => return Value::Boolean(false),
			_ => {}
		}

		if let Some(inner) = strip_quotes(text) {
			if !inner.contains('\\') {
				return Value::String(inner.to_string());
			}

			return Value::String(unescape(inner).unwrap_or_else(|_| inner.to_string()));
		}

		if is_numeric_literal(text) {
			let is_float = text.contains('.') || text.contains('e') || text.contains('E');
			if !is_float {
				if let Ok(v) = text.parse::<i64>() {
					return Value::Int(v);
				}
			}

			if let Ok(v) = text.parse::<f64>() {
				return Value::Float(v);
			}
		}

		Value::String(text.to_string())
	}
}

fn strip_quotes(text: &str) -> Option<&str> {
	let bytes = text.as_bytes();
	if bytes.len() < 2 {
		return None;
	}

	let first = bytes[0];
	let last = bytes[bytes.len() - 1];
	if (first == b'"' || first == b'\'') && first == last {
		Some(&text[1..text.len() - 1])
	} else {
		None
	}
}

fn is_numeric_literal(text: &str) -> bool {
	text.bytes().any(|b| b.is_ascii_digit())
		&& text
			.bytes()
			.all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

/// Textual form of a float: shortest round-trip digits, no trailing `.0`,
/// and `NaN` / `Infinity` / `-Infinity` for the non-finite values.
fn format_float(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_string()
	} else if value.is_infinite() {
		if value.is_sign_positive() {
			"Infinity".to_string()
		} else {
			"-Infinity".to_string()
		}
	} else if value == 0.0 {
		"0".to_string()
	} else {
		value.to_string()
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Boolean(value) => write!(f, "{value}"),
			Value::Int(value) => write!(f, "{value}"),
			Value::Float(value) => write!(f, "{}", format_float(*value)),
			Value::String(value) => write!(f, "{value}"),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<&String> for Value {
	fn from(value: &String) -> Self {
		Value::String(value.clone())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Boolean(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// A partial mapping from bare name to value. `None` marks a name that is
/// deliberately left unresolved.
///
/// ```json
/// { "name": "Ada", "count": 3, "later": null }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Replacements(
	#[deref]
	#[deref_mut]
	BTreeMap<String, Option<Value>>,
);

impl Replacements {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of inserting a present value.
	#[must_use]
	pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(name.into(), Some(value.into()));
		self
	}

	/// Builder form of marking a name as absent.
	#[must_use]
	pub fn unset(mut self, name: impl Into<String>) -> Self {
		self.0.insert(name.into(), None);
		self
	}

	/// The present value for `name`, if any.
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.0.get(name).and_then(Option::as_ref)
	}

	/// Names that carry a present value.
	pub fn present_names(&self) -> impl Iterator<Item = &str> {
		self.0
			.iter()
			.filter(|(_, value)| value.is_some())
			.map(|(name, _)| name.as_str())
	}

	/// Layer `other` over `self`. Present values in `other` win; an absent
	/// entry in `other` never erases a present value from `self`.
	#[must_use]
	pub fn merged_with(&self, other: &Replacements) -> Replacements {
		let mut merged = self.clone();
		for (name, value) in other.iter() {
			match value {
				Some(value) => {
					merged.0.insert(name.clone(), Some(value.clone()));
				}
				None => {
					merged.0.entry(name.clone()).or_insert(None);
				}
			}
		}

		merged
	}

	/// Parse a JSON object of primitives and nulls.
	pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn into_inner(self) -> BTreeMap<String, Option<Value>> {
		self.0
	}
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.into(), Some(value.into())))
				.collect(),
		)
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Replacements
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl From<BTreeMap<String, Option<Value>>> for Replacements {
	fn from(map: BTreeMap<String, Option<Value>>) -> Self {
		Self(map)
	}
}

/// Build a [`Replacements`] set from `name => value` pairs.
///
/// ```rust
/// use tagfill_core::replacements;
///
/// let values = replacements! { "name" => "Ada", "count" => 3 };
/// assert_eq!(values.len(), 2);
/// ```
#[macro_export]
macro_rules! replacements {
	() => {
		$crate::Replacements::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {
		$crate::Replacements::new()$(.set($name, $value))+
	};
}
