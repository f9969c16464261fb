use predicates::prelude::*;
use readgen_core::AnyEmptyResult;

mod common;

fn generate(root: &std::path::Path) {
	common::readgen_cmd()
		.arg("generate")
		.arg("--path")
		.arg(root)
		.assert()
		.success();
}

#[test]
fn check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;
	generate(tmp.path());

	common::readgen_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_fails_when_readme_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;

	common::readgen_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("does not exist"));

	Ok(())
}

#[test]
fn check_fails_when_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;
	generate(tmp.path());

	// A new env variable changes the expected document.
	common::write_file(
		tmp.path(),
		".env.example",
		"SHOP_DB=sqlite:// # Database URL\nSHOP_DEBUG=0 # Verbose logging\n",
	)?;

	common::readgen_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("out of date"))
		.stderr(predicate::str::contains("SHOP_DEBUG").not());

	Ok(())
}

#[test]
fn check_diff_shows_changed_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;
	generate(tmp.path());

	common::write_file(
		tmp.path(),
		"pyproject.toml",
		"[project]\nname = \"store\"\ndescription = \"A tiny shop.\"\n",
	)?;

	common::readgen_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("-# shop"))
		.stderr(predicate::str::contains("+# store"));

	Ok(())
}

#[test]
fn check_custom_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;

	common::readgen_cmd()
		.arg("generate")
		.arg("-o")
		.arg("OVERVIEW.md")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::readgen_cmd()
		.arg("check")
		.arg("-o")
		.arg("OVERVIEW.md")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}
