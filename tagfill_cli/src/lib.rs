use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use tagfill_core::Replacements;
use tagfill_core::TagfillResult;
use tagfill_core::Tags;
use tagfill_core::config::TagfillConfig;
use tagfill_core::config::load_values_file;
use tagfill_core::config::parse_assignment;
use tracing::debug;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill `{placeholder}` templates and catch unresolved or misspelled names.",
	long_about = "tagfill renders text templates containing `{name}` placeholders.\n\nValues \
	              come from `tagfill.toml`, a JSON values file, and `--set name=value` \
	              assignments, in increasing order of precedence. Placeholders without a value \
	              are left as they are unless validation is on.\n\nQuick start:\n  tagfill \
	              render greeting.txt --set name=Ada\n  tagfill placeholders greeting.txt\n  \
	              tagfill check greeting.txt --values values.json"
)]
pub struct TagfillCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory used to discover `tagfill.toml`. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Start marker for placeholders. Overrides the config.
	#[arg(long, global = true)]
	pub start: Option<String>,

	/// End marker for placeholders. Overrides the config.
	#[arg(long, global = true)]
	pub end: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a template and print the result.
	///
	/// Placeholders with a value are replaced everywhere they occur. The rest
	/// are printed unchanged, unless `--validate` (or `validate = true` in the
	/// config) is set, in which case the command exits with status 1 and lists
	/// the unresolved placeholders.
	Render {
		/// Template file to read, or `-` for stdin.
		input: PathBuf,

		#[command(flatten)]
		values: ValueArgs,

		/// Fail when placeholders remain after rendering.
		#[arg(long, default_value_t = false)]
		validate: bool,
	},
	/// List the placeholders and the derived contract of a template.
	Placeholders {
		/// Template file to read, or `-` for stdin.
		input: PathBuf,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Check supplied values against a template's contract.
	///
	/// Reports names that have no value and supplied names that the template
	/// doesn't use. Exits with status 1 when any name is missing.
	Check {
		/// Template file to read, or `-` for stdin.
		input: PathBuf,

		#[command(flatten)]
		values: ValueArgs,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct ValueArgs {
	/// Set a value, e.g. `--set name=Ada`. Repeatable. Quote a value to keep
	/// it a string: `--set 'id="42"'`.
	#[arg(long = "set", short = 's', value_name = "NAME=VALUE")]
	pub set: Vec<String>,

	/// JSON file with an object of values. `--set` wins over it.
	#[arg(long, value_name = "FILE")]
	pub values: Option<PathBuf>,
}

impl ValueArgs {
	/// Collect the values file first, then layer the `--set` assignments on
	/// top.
	pub fn collect(&self) -> TagfillResult<Replacements> {
		let mut replacements = match &self.values {
			Some(path) => load_values_file(path)?,
			None => Replacements::new(),
		};

		for assignment in &self.set {
			let (name, value) = parse_assignment(assignment)?;
			replacements.insert(name, Some(value));
		}

		debug!(count = replacements.len(), "collected command line values");
		Ok(replacements)
	}
}

pub fn resolve_root(path: Option<&Path>) -> PathBuf {
	path.map(Path::to_path_buf)
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the discovered config, falling back to defaults when there is none.
pub fn load_config(root: &Path) -> TagfillResult<TagfillConfig> {
	Ok(TagfillConfig::load(root)?.unwrap_or_default())
}

/// Apply `--start` / `--end` over the configured tags.
pub fn resolve_tags(
	config: &TagfillConfig,
	start: Option<&str>,
	end: Option<&str>,
) -> TagfillResult<Tags> {
	Tags::try_new(
		start.unwrap_or(&config.tags.start),
		end.unwrap_or(&config.tags.end),
	)
}

/// Read a template from a file, or from stdin when `input` is `-`.
pub fn read_input(input: &Path) -> TagfillResult<String> {
	if input == Path::new("-") {
		return Ok(std::io::read_to_string(std::io::stdin())?);
	}

	Ok(std::fs::read_to_string(input)?)
}
