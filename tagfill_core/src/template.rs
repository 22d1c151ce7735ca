use std::collections::BTreeMap;
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::Contract;
use crate::ContractReport;
use crate::Placeholder;
use crate::Replacements;
use crate::Tags;
use crate::ValidationError;
use crate::Value;
use crate::scanner::scan;

/// A text with placeholders, its delimiter pair, and the defaults used to
/// fill them.
///
/// The placeholder list, the contract and the defaults are computed together
/// from the text at construction and never change afterwards. Operations
/// that would change a template return a new one instead.
///
/// ```rust
/// use tagfill_core::Template;
/// use tagfill_core::replacements;
///
/// let template = Template::new("Hello {name}!");
/// assert_eq!(template.render(&replacements! { "name" => "Ada" }), "Hello Ada!");
/// assert!(template.render_validated(&replacements! {}).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
	text: String,
	tags: Tags,
	placeholders: Vec<Placeholder>,
	contract: Contract,
	defaults: Replacements,
}

impl Template {
	/// Create a template using the default `{` / `}` tags and no defaults.
	pub fn new(text: impl Into<String>) -> Self {
		Self::with_options(text, Tags::default(), &Replacements::new())
	}

	/// Create a template with a custom delimiter pair.
	pub fn with_tags(text: impl Into<String>, tags: impl Into<Tags>) -> Self {
		Self::with_options(text, tags, &Replacements::new())
	}

	/// Create a template with a custom delimiter pair and initial
	/// replacement values. Names in `initial` that don't occur in the text
	/// are dropped; names that occur but aren't supplied default to absent.
	pub fn with_options(
		text: impl Into<String>,
		tags: impl Into<Tags>,
		initial: &Replacements,
	) -> Self {
		let text = text.into();
		let tags = tags.into();
		let placeholders = scan(&text, &tags);
		let contract = Contract::derive(placeholders.iter().map(|p| p.span.as_str()), &tags);

		let mut defaults = Replacements::new();
		for name in contract.names() {
			defaults.insert(name.to_string(), initial.value(name).cloned());
		}

		for name in initial.keys().filter(|name| !contract.contains(name)) {
			trace!(name = %name, "ignoring initial value with no placeholder");
		}

		debug!(
			placeholders = placeholders.len(),
			names = contract.len(),
			"created template"
		);

		Self {
			text,
			tags,
			placeholders,
			contract,
			defaults,
		}
	}

	/// Substitute every placeholder that resolves to a present value and
	/// leave the rest untouched. A value in `overrides` wins over the stored
	/// default for this call only; an absent override falls back to the
	/// default.
	pub fn render(&self, overrides: &Replacements) -> String {
		let mut result = self.text.clone();
		let mut seen: HashSet<&str> = HashSet::new();
		let mut unresolved = 0;

		for placeholder in &self.placeholders {
			let span = placeholder.span.as_str();
			if !seen.insert(span) {
				continue;
			}

			let Some(name) = self.contract.name_of(span) else {
				continue;
			};

			match self.resolve(name, overrides) {
				Some(value) => result = result.replace(span, &value.to_string()),
				None => unresolved += 1,
			}
		}

		trace!(spans = seen.len(), unresolved, "rendered template");
		result
	}

	/// Render, then fail if any placeholder is left in the result.
	pub fn render_validated(&self, overrides: &Replacements) -> Result<String, ValidationError> {
		self.render_with(overrides, true)
	}

	/// Render with validation switched on or off.
	pub fn render_with(
		&self,
		overrides: &Replacements,
		validate: bool,
	) -> Result<String, ValidationError> {
		let rendered = self.render(overrides);
		if validate {
			self.validate(&rendered)?;
		}

		Ok(rendered)
	}

	/// Bake `replacements` into a new template with the same tags.
	///
	/// The rendered text is scanned again, so a substituted value that itself
	/// looks like a placeholder (`{other}`) becomes a live placeholder of the
	/// new template.
	#[must_use]
	pub fn fork(&self, replacements: &Replacements) -> Template {
		let rendered = self.render(replacements);
		let defaults = self.defaults.merged_with(replacements);
		let forked = Template::with_options(rendered, self.tags.clone(), &defaults);

		debug!(
			before = self.placeholders.len(),
			after = forked.placeholders.len(),
			"forked template"
		);
		forked
	}

	/// Fail when `text`, scanned with this template's tags, still contains
	/// placeholders.
	pub fn validate(&self, text: &str) -> Result<(), ValidationError> {
		let remaining = scan(text, &self.tags);
		if remaining.is_empty() {
			return Ok(());
		}

		let (spans, names): (Vec<String>, Vec<String>) = remaining
			.into_iter()
			.map(|placeholder| (placeholder.span, placeholder.name))
			.unzip();
		debug!(remaining = ?spans, "template failed validation");

		Err(ValidationError::new(text, spans, names))
	}

	/// Compare the defaults layered with `overrides` against the contract.
	pub fn check(&self, overrides: &Replacements) -> ContractReport {
		self.contract.check(&self.defaults.merged_with(overrides))
	}

	fn resolve<'a>(&'a self, name: &str, overrides: &'a Replacements) -> Option<&'a Value> {
		overrides.value(name).or_else(|| self.defaults.value(name))
	}

	/// The raw text.
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn tags(&self) -> &Tags {
		&self.tags
	}

	pub fn start_tag(&self) -> &str {
		&self.tags.start
	}

	pub fn end_tag(&self) -> &str {
		&self.tags.end
	}

	/// Every placeholder occurrence in order, including repeats.
	pub fn placeholders(&self) -> &[Placeholder] {
		&self.placeholders
	}

	/// Literal spans in order, including repeats.
	pub fn spans(&self) -> Vec<&str> {
		self.placeholders.iter().map(|p| p.span.as_str()).collect()
	}

	/// The span → bare name table.
	pub fn placeholder_names(&self) -> &BTreeMap<String, String> {
		self.contract.spans()
	}

	/// The bare name → value defaults. Every contract name has an entry.
	pub fn defaults(&self) -> &Replacements {
		&self.defaults
	}

	pub fn contract(&self) -> &Contract {
		&self.contract
	}

	/// Returns true when the text has no placeholders left.
	pub fn is_resolved(&self) -> bool {
		self.placeholders.is_empty()
	}

	pub fn into_string(self) -> String {
		self.text
	}
}

impl Display for Template {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.text)
	}
}

impl AsRef<str> for Template {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

impl FromStr for Template {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Template::new(s))
	}
}

impl From<&str> for Template {
	fn from(text: &str) -> Self {
		Template::new(text)
	}
}

impl From<String> for Template {
	fn from(text: String) -> Self {
		Template::new(text)
	}
}

impl From<Template> for String {
	fn from(template: Template) -> Self {
		template.text
	}
}
