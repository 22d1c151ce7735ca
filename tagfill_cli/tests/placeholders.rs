mod common;

use serde_json::Value;
use similar_asserts::assert_eq;
use tagfill_core::AnyEmptyResult;

#[test]
fn placeholders_lists_spans_and_contract() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "Hello {name}, {name}! {n}\n")?;

	common::tagfill_cmd()
		.arg("placeholders")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("{name} (offset 6)"))
		.stdout(predicates::str::contains("{n} (offset 22)"))
		.stdout(predicates::str::contains(
			"name: string | number | boolean (2 occurrence(s))",
		))
		.stdout(predicates::str::contains("3 placeholder(s), 2 name(s)"));

	Ok(())
}

#[test]
fn placeholders_shows_config_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("tagfill.toml"), "[values]\nn = 3\n")?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{n} items")?;

	common::tagfill_cmd()
		.arg("placeholders")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"n: string | number | boolean (1 occurrence(s)) = 3",
		));

	Ok(())
}

#[test]
fn placeholders_reports_none() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "nothing {{here}}")?;

	common::tagfill_cmd()
		.arg("placeholders")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("No placeholders found.\n");

	Ok(())
}

#[test]
fn placeholders_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("template.txt");
	std::fs::write(&input, "{a}-{a}-{b}")?;

	let output = common::tagfill_cmd()
		.arg("placeholders")
		.arg(&input)
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: Value = serde_json::from_slice(&output)?;
	assert_eq!(json["tags"]["start"], "{");
	assert_eq!(json["tags"]["end"], "}");

	let Some(placeholders) = json["placeholders"].as_array() else {
		panic!("expected a placeholders array");
	};
	assert_eq!(placeholders.len(), 3);
	assert_eq!(placeholders[2]["span"], "{b}");
	assert_eq!(placeholders[2]["offset"], 8);

	assert_eq!(json["names"]["a"]["occurrences"], 2);
	assert_eq!(
		json["names"]["b"]["kinds"],
		serde_json::json!(["string", "number", "boolean"])
	);
	assert_eq!(json["defaults"]["a"], Value::Null);

	Ok(())
}
