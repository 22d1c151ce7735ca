mod common;

use serde_json::Value;
use similar_asserts::assert_eq;
use tagfill_core::AnyEmptyResult;

#[test]
fn check_reports_missing_and_unknown_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "Hi {name}, you are {age}")?;

	common::tagfill_cmd()
		.arg("check")
		.arg(&input)
		.arg("--set")
		.arg("name=Ada")
		.arg("--set")
		.arg("nmae=typo")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("missing: no value for {age}"))
		.stdout(predicates::str::contains(
			"unknown: `nmae` does not match any placeholder",
		));

	Ok(())
}

#[test]
fn check_passes_when_every_name_has_a_value() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "Hi {name}, you are {age}")?;

	common::tagfill_cmd()
		.arg("check")
		.arg(&input)
		.arg("-s")
		.arg("name=Ada")
		.arg("-s")
		.arg("age=36")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("All 2 name(s) have values."));

	Ok(())
}

#[test]
fn check_counts_config_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("tagfill.toml"), "[values]\nname = \"Ada\"\n")?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "Hi {name}, you are {age}")?;

	common::tagfill_cmd()
		.arg("check")
		.arg(&input)
		.arg("--set")
		.arg("age=36")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{a} {b}")?;

	let output = common::tagfill_cmd()
		.arg("check")
		.arg(&input)
		.arg("--set")
		.arg("a=1")
		.arg("--set")
		.arg("c=2")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.get_output()
		.stdout
		.clone();

	let json: Value = serde_json::from_slice(&output)?;
	assert_eq!(json["satisfied"], false);
	assert_eq!(json["missing"], serde_json::json!(["b"]));
	assert_eq!(json["unknown"], serde_json::json!(["c"]));

	Ok(())
}
