mod common;

use tagfill_core::AnyEmptyResult;

#[test]
fn render_substitutes_set_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("greeting.txt");
	std::fs::write(&input, "Hello {name}!\n")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("name=Ada")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Hello Ada!\n");

	Ok(())
}

#[test]
fn render_leaves_unresolved_placeholders() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("greeting.txt");
	std::fs::write(&input, "Hello {name} and {other}!\n")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("name=Ada")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Hello Ada and {other}!\n");

	Ok(())
}

#[test]
fn render_validate_fails_on_unresolved() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("greeting.txt");
	std::fs::write(&input, "Hello {name}!\n")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--validate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicates::str::contains("unresolved placeholder"))
		.stderr(predicates::str::contains("{name}"));

	Ok(())
}

#[test]
fn render_ignores_doubled_markers_when_validating() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("literal.txt");
	std::fs::write(&input, "{{id}}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("id=5")
		.arg("--validate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("{{id}}");

	Ok(())
}

#[test]
fn render_uses_config_values_and_validation() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("tagfill.toml"),
		"validate = true\n\n[values]\nname = \"Config\"\n",
	)?;
	let input = tmp.path().join("greeting.txt");
	std::fs::write(&input, "Hi {name}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Hi Config");

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("name=Cli")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Hi Cli");

	std::fs::write(&input, "Hi {name}, {missing}")?;
	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("{missing}"));

	Ok(())
}

#[test]
fn render_set_wins_over_values_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let values = tmp.path().join("values.json");
	std::fs::write(&values, r#"{"name": "File", "n": 2}"#)?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{name} {n}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--values")
		.arg(&values)
		.arg("--set")
		.arg("name=Set")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Set 2");

	Ok(())
}

#[test]
fn render_with_custom_tags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "<<a>> {a}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--start")
		.arg("<<")
		.arg("--end")
		.arg(">>")
		.arg("--set")
		.arg("a=1")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("1 {a}");

	Ok(())
}

#[test]
fn render_reads_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::tagfill_cmd()
		.arg("render")
		.arg("-")
		.arg("--set")
		.arg("x=true")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("enabled: {x}")
		.assert()
		.success()
		.stdout("enabled: true");

	Ok(())
}

#[test]
fn render_quoted_values_stay_strings() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "id={id}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("id=\"007\"")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("id=007");

	Ok(())
}

#[test]
fn render_rejects_malformed_assignment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{a}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--set")
		.arg("novalue")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid assignment"));

	Ok(())
}

#[test]
fn render_rejects_empty_tags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{a}")?;

	common::tagfill_cmd()
		.arg("render")
		.arg(&input)
		.arg("--start=")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid tags"));

	Ok(())
}

#[test]
fn render_reports_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::tagfill_cmd()
		.arg("render")
		.arg(tmp.path().join("missing.txt"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn no_subcommand_exits_with_usage_hint() {
	common::tagfill_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("tagfill --help"));
}
