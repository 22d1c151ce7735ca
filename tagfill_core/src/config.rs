use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::Replacements;
use crate::TagfillError;
use crate::TagfillResult;
use crate::Tags;
use crate::Template;
use crate::Value;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["tagfill.toml", ".tagfill.toml", ".config/tagfill.toml"];

/// Configuration loaded from a `tagfill.toml` file.
///
/// ```toml
/// validate = true
///
/// [tags]
/// start = "{"
/// end = "}"
///
/// [values]
/// name = "Ada"
/// count = 3
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TagfillConfig {
	/// Delimiter pair. Missing fields fall back to `{` and `}`.
	#[serde(default)]
	pub tags: Tags,
	/// Default values applied to every template.
	#[serde(default)]
	pub values: Replacements,
	/// Whether rendering fails on unresolved placeholders by default.
	#[serde(default)]
	pub validate: bool,
}

impl TagfillConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> TagfillResult<Option<TagfillConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml_str(&content)?;
		debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse and check a config document.
	pub fn from_toml_str(content: &str) -> TagfillResult<TagfillConfig> {
		let config: TagfillConfig =
			toml::from_str(content).map_err(|e| TagfillError::ConfigParse(e.to_string()))?;

		if config.tags.is_empty() {
			return Err(TagfillError::InvalidTags {
				start: config.tags.start,
				end: config.tags.end,
			});
		}

		Ok(config)
	}

	/// Build a template from `text` using the configured tags and values.
	pub fn template(&self, text: impl Into<String>) -> Template {
		Template::with_options(text, self.tags.clone(), &self.values)
	}
}

/// Load a JSON replacement set from disk.
pub fn load_values_file(path: &Path) -> TagfillResult<Replacements> {
	let content = std::fs::read_to_string(path).map_err(|e| {
		TagfillError::ValuesFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})?;

	Replacements::from_json_str(&content).map_err(|e| {
		TagfillError::ValuesFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})
}

/// Parse a `name=value` assignment. Both sides are trimmed and the value goes
/// through [`Value::parse_literal`].
pub fn parse_assignment(assignment: &str) -> TagfillResult<(String, Value)> {
	let Some((name, value)) = assignment.split_once('=') else {
		return Err(TagfillError::InvalidAssignment(assignment.to_string()));
	};

	let name = name.trim();
	if name.is_empty() {
		return Err(TagfillError::InvalidAssignment(assignment.to_string()));
	}

	Ok((name.to_string(), Value::parse_literal(value.trim())))
}
