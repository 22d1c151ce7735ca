use std::collections::BTreeMap;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use tagfill_cli::Commands;
use tagfill_cli::OutputFormat;
use tagfill_cli::TagfillCli;
use tagfill_cli::ValueArgs;
use tagfill_cli::load_config;
use tagfill_cli::read_input;
use tagfill_cli::resolve_root;
use tagfill_cli::resolve_tags;
use tagfill_core::ContractReport;
use tagfill_core::Expected;
use tagfill_core::Placeholder;
use tagfill_core::Replacements;
use tagfill_core::TagfillError;
use tagfill_core::Tags;
use tagfill_core::Template;
use tagfill_core::config::TagfillConfig;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TagfillCli::parse();

	// Respect NO_COLOR and --no-color.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			input,
			values,
			validate,
		}) => run_render(&args, input, values, *validate),
		Some(Commands::Placeholders { input, format }) => run_placeholders(&args, input, *format),
		Some(Commands::Check {
			input,
			values,
			format,
		}) => run_check(&args, input, values, *format),
		None => {
			eprintln!("No subcommand specified. Run `tagfill --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		report_error(e);
		process::exit(2);
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init();
}

/// Render through miette when the error is ours, for help text and codes.
fn report_error(e: Box<dyn std::error::Error>) {
	match e.downcast::<TagfillError>() {
		Ok(tagfill_err) => {
			let report: miette::Report = (*tagfill_err).into();
			eprintln!("{report:?}");
		}
		Err(e) => {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

/// Everything a command needs: the config, the resolved tags and the
/// template text.
struct Loaded {
	config: TagfillConfig,
	tags: Tags,
	text: String,
}

fn load(args: &TagfillCli, input: &std::path::Path) -> Result<Loaded, Box<dyn std::error::Error>> {
	let root = resolve_root(args.path.as_deref());
	let config = load_config(&root)?;
	let tags = resolve_tags(&config, args.start.as_deref(), args.end.as_deref())?;
	let text = read_input(input)?;

	Ok(Loaded { config, tags, text })
}

fn warn_unknown(template: &Template, values: &Replacements) {
	for name in values.keys().filter(|name| !template.contract().contains(name)) {
		tracing::warn!(name = %name, "value does not match any placeholder");
	}
}

fn run_render(
	args: &TagfillCli,
	input: &std::path::Path,
	values: &ValueArgs,
	validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let Loaded { config, tags, text } = load(args, input)?;
	let overrides = values.collect()?;
	let template = Template::with_options(text, tags, &config.values);
	warn_unknown(&template, &overrides);

	match template.render_with(&overrides, validate || config.validate) {
		Ok(rendered) => {
			print!("{rendered}");
			Ok(())
		}
		Err(error) => {
			let report: miette::Report = TagfillError::from(error).into();
			eprintln!("{report:?}");
			process::exit(1);
		}
	}
}

#[derive(Serialize)]
struct PlaceholdersOutput<'a> {
	tags: &'a Tags,
	placeholders: &'a [Placeholder],
	names: &'a BTreeMap<String, Expected>,
	defaults: &'a Replacements,
}

fn run_placeholders(
	args: &TagfillCli,
	input: &std::path::Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let Loaded { config, tags, text } = load(args, input)?;
	let template = Template::with_options(text, tags, &config.values);

	if matches!(format, OutputFormat::Json) {
		let output = PlaceholdersOutput {
			tags: template.tags(),
			placeholders: template.placeholders(),
			names: template.contract().entries(),
			defaults: template.defaults(),
		};
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	if template.is_resolved() {
		println!("No placeholders found.");
		return Ok(());
	}

	println!("{}", colored!("Placeholders:", bold));
	for placeholder in template.placeholders() {
		println!("  {} (offset {})", placeholder.span, placeholder.offset);
	}

	println!();
	println!("{}", colored!("Contract:", bold));
	for (name, expected) in template.contract().entries() {
		let default = match template.defaults().value(name) {
			Some(value) => format!(" = {value}"),
			None => String::new(),
		};
		println!(
			"  {name}: {expected} ({} occurrence(s)){default}",
			expected.occurrences
		);
	}

	println!(
		"\n{} placeholder(s), {} name(s)",
		template.placeholders().len(),
		template.contract().len()
	);

	Ok(())
}

#[derive(Serialize)]
struct CheckOutput<'a> {
	satisfied: bool,
	#[serde(flatten)]
	report: &'a ContractReport,
}

fn run_check(
	args: &TagfillCli,
	input: &std::path::Path,
	values: &ValueArgs,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let Loaded { config, tags, text } = load(args, input)?;
	let supplied = values.collect()?;
	let template = Template::with_options(text, tags, &config.values);
	let report = template.check(&supplied);

	match format {
		OutputFormat::Json => {
			let output = CheckOutput {
				satisfied: report.is_satisfied(),
				report: &report,
			};
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			for name in &report.missing {
				println!(
					"{} no value for {}",
					colored!("missing:", red),
					template.tags().wrap(name)
				);
			}
			for name in &report.unknown {
				println!(
					"{} `{name}` does not match any placeholder",
					colored!("unknown:", yellow)
				);
			}

			if report.is_satisfied() {
				println!(
					"{}",
					colored!(
						format!("All {} name(s) have values.", template.contract().len()),
						green
					)
				);
			}
		}
	}

	if !report.is_satisfied() {
		process::exit(1);
	}

	Ok(())
}
