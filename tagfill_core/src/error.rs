use miette::Diagnostic;
use thiserror::Error;

/// Raised when a rendered text still contains placeholders.
///
/// This is the only failure a [`Template`](crate::Template) can produce, and
/// only when the caller asked for validation.
#[derive(Debug, Clone, Diagnostic, Error, PartialEq, Eq)]
#[error("template has {} unresolved placeholder(s): {}", .missing_replacements.len(), .missing_replacements.join(", "))]
#[diagnostic(
	code(tagfill::validation),
	help("supply a value for each remaining placeholder or render without validation")
)]
pub struct ValidationError {
	/// The text that failed validation.
	pub template: String,
	/// The placeholder spans left in `template`, in order of appearance
	/// (e.g., `["{name}"]`).
	pub missing_replacements: Vec<String>,
	/// Bare names matching `missing_replacements`, deduplicated.
	names: Vec<String>,
}

impl ValidationError {
	pub(crate) fn new(
		template: impl Into<String>,
		missing_replacements: Vec<String>,
		names: Vec<String>,
	) -> Self {
		let mut unique: Vec<String> = Vec::with_capacity(names.len());
		for name in names {
			if !unique.contains(&name) {
				unique.push(name);
			}
		}

		Self {
			template: template.into(),
			missing_replacements,
			names: unique,
		}
	}

	/// The distinct bare names that still need a value.
	pub fn missing_names(&self) -> &[String] {
		&self.names
	}
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TagfillError {
	#[error(transparent)]
	#[diagnostic(code(tagfill::io_error))]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	#[diagnostic(transparent)]
	Validation(#[from] ValidationError),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tagfill::config_parse),
		help("check that tagfill.toml is valid TOML with [tags] and/or [values] sections")
	)]
	ConfigParse(String),

	#[error("failed to load values file `{path}`: {reason}")]
	#[diagnostic(
		code(tagfill::values_file),
		help("values files must contain a JSON object of strings, numbers, booleans or null")
	)]
	ValuesFile { path: String, reason: String },

	#[error("invalid assignment: `{0}`")]
	#[diagnostic(
		code(tagfill::invalid_assignment),
		help("assignments take the form `name=value`")
	)]
	InvalidAssignment(String),

	#[error("invalid tags: start `{start}`, end `{end}`")]
	#[diagnostic(
		code(tagfill::invalid_tags),
		help("both the start and end tag must be non-empty")
	)]
	InvalidTags { start: String, end: String },
}

pub type TagfillResult<T> = Result<T, TagfillError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
