mod common;

use predicates::prelude::PredicateBooleanExt;
use supports_color::Stream;
use yamlayout_cli::ColorSupport;

#[test]
fn piped_stdout_keeps_stderr_colored() {
	let colors = ColorSupport::detect(false, |stream| matches!(stream, Stream::Stderr));

	assert_eq!(
		colors,
		ColorSupport {
			stdout: false,
			stderr: true,
		}
	);
}

#[test]
fn piped_stderr_keeps_stdout_colored() {
	let colors = ColorSupport::detect(false, |stream| matches!(stream, Stream::Stdout));

	assert!(colors.stdout);
	assert!(!colors.stderr);
}

#[test]
fn disabled_color_ignores_the_terminal() {
	let colors = ColorSupport::detect(true, |_| true);

	assert_eq!(
		colors,
		ColorSupport {
			stdout: false,
			stderr: false,
		}
	);
}

#[test]
fn no_color_output_has_no_escape_codes() -> yamlayout_core::AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = tmp.path().join("notes.txt");
	std::fs::write(&notes, "div: x\n")?;

	common::yamlayout_cmd()
		.arg("--no-color")
		.arg("compile")
		.arg(&notes)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("\u{1b}[").not());

	Ok(())
}
