mod common;

use predicates::prelude::PredicateBooleanExt;
use yamlayout_core::AnyEmptyResult;

#[test]
fn compile_prints_the_component_module() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let layout = tmp.path().join("home.yaml");
	std::fs::write(
		&layout,
		"# include Header\n'main#app':\n  - Header: {}\n  - h1: Welcome\n",
	)?;

	let output = common::yamlayout_cmd()
		.arg("compile")
		.arg(&layout)
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout)?;
	insta::assert_snapshot!(stdout.trim_end(), @r"
import React from 'react'
import Header from '../components/header'

const home = (props) => (<><main id={`app`}><Header /><h1>{`Welcome`}</h1></main></>);

export default home");

	Ok(())
}

#[test]
fn compile_prints_nocompile_layouts_as_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let layout = tmp.path().join("routes.yml");
	std::fs::write(&layout, "# NoCompile\nroutes:\n  - home\n")?;

	common::yamlayout_cmd()
		.arg("compile")
		.arg(&layout)
		.assert()
		.success()
		.stdout(predicates::str::contains("\"routes\": [\n    \"home\"\n  ]"))
		.stdout(predicates::str::contains("export default").not());

	Ok(())
}

#[test]
fn compile_uses_the_configured_components_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join(".yamlayout.toml"),
		"[components]\ndirectory = \"@/components\"\n",
	)?;
	let layout = tmp.path().join("page.yaml");
	std::fs::write(&layout, "# include Card\ndiv: x\n")?;

	common::yamlayout_cmd()
		.arg("compile")
		.arg(&layout)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"import Card from '@/components/card'",
		));

	Ok(())
}

#[test]
fn compile_rejects_non_yaml_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = tmp.path().join("notes.txt");
	std::fs::write(&notes, "div: x\n")?;

	common::yamlayout_cmd()
		.arg("compile")
		.arg(&notes)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("yamlayout::not_yaml"));

	Ok(())
}

#[test]
fn compile_reports_scalar_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let layout = tmp.path().join("bad.yaml");
	std::fs::write(&layout, "42\n")?;

	common::yamlayout_cmd()
		.arg("compile")
		.arg(&layout)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("yamlayout::invalid_input_kind"));

	Ok(())
}

#[test]
fn compile_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("yamlayout.toml"), "[components\n")?;
	let layout = tmp.path().join("home.yaml");
	std::fs::write(&layout, "div: x\n")?;

	common::yamlayout_cmd()
		.arg("compile")
		.arg(&layout)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("yamlayout::config_parse"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::yamlayout_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("yamlayout --help"));
}
