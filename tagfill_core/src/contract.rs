use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::Replacements;
use crate::Tags;
use crate::Value;
use crate::ValueKind;

/// What a placeholder accepts and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expected {
	/// Accepted value kinds. Placeholders are untyped, so this is always
	/// every kind.
	pub kinds: Vec<ValueKind>,
	/// Number of spans in the text that resolve to this name.
	pub occurrences: usize,
}

impl Default for Expected {
	fn default() -> Self {
		Self {
			kinds: ValueKind::ALL.to_vec(),
			occurrences: 0,
		}
	}
}

impl Expected {
	pub fn accepts(&self, value: &Value) -> bool {
		self.kinds.contains(&value.kind())
	}
}

impl Display for Expected {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kinds: Vec<String> = self.kinds.iter().map(ToString::to_string).collect();
		write!(f, "{}", kinds.join(" | "))
	}
}

/// The named-value contract of a template: every distinct bare name mapped
/// to what it accepts, plus the span → name table used during
/// substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contract {
	entries: BTreeMap<String, Expected>,
	spans: BTreeMap<String, String>,
}

impl Contract {
	/// Derive a contract from literal spans by stripping `tags` from each.
	/// Repeated names collapse into one entry.
	pub fn derive<I, S>(spans: I, tags: &Tags) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut contract = Contract::default();

		for span in spans {
			let span = span.as_ref();
			let name = tags.strip(span).to_string();
			contract.entries.entry(name.clone()).or_default().occurrences += 1;
			contract.spans.insert(span.to_string(), name);
		}

		debug!(
			names = contract.entries.len(),
			spans = contract.spans.len(),
			"derived contract"
		);
		contract
	}

	/// Bare names in the contract, sorted.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn get(&self, name: &str) -> Option<&Expected> {
		self.entries.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn entries(&self) -> &BTreeMap<String, Expected> {
		&self.entries
	}

	/// The span → bare name table, e.g. `{name}` → `name`.
	pub fn spans(&self) -> &BTreeMap<String, String> {
		&self.spans
	}

	/// Bare name for a literal span.
	pub fn name_of(&self, span: &str) -> Option<&str> {
		self.spans.get(span).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Compare a replacement set against the contract. Names without a
	/// present value are `missing`; supplied names the contract doesn't know
	/// are `unknown`, which usually means a typo.
	pub fn check(&self, replacements: &Replacements) -> ContractReport {
		let missing = self
			.entries
			.keys()
			.filter(|name| replacements.value(name).is_none())
			.cloned()
			.collect();
		let unknown = replacements
			.keys()
			.filter(|name| !self.entries.contains_key(*name))
			.cloned()
			.collect();

		ContractReport { missing, unknown }
	}
}

/// Result of [`Contract::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractReport {
	/// Contract names with no present value, sorted.
	pub missing: Vec<String>,
	/// Supplied names absent from the contract, sorted.
	pub unknown: Vec<String>,
}

impl ContractReport {
	/// Returns true when every contract name has a value.
	pub fn is_satisfied(&self) -> bool {
		self.missing.is_empty()
	}

	/// Returns true when the set is satisfied and has no unknown names.
	pub fn is_exact(&self) -> bool {
		self.missing.is_empty() && self.unknown.is_empty()
	}
}
