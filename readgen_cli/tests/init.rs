use predicates::prelude::*;
use readgen_core::AnyEmptyResult;
use readgen_core::ConfigResolver;

mod common;

#[test]
fn init_creates_sample_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::readgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created"));

	let config_path = tmp.path().join("readgen.toml");
	assert!(config_path.is_file());

	common::write_file(
		tmp.path(),
		"pyproject.toml",
		"[project]\nname = \"kite\"\ndescription = \"Flies high.\"\n",
	)?;
	let resolver = ConfigResolver::load(tmp.path());
	let blocks = resolver.content_blocks();
	assert_eq!(blocks.len(), 1);
	assert_eq!(blocks[0].title, "kite");
	assert_eq!(blocks[0].content.trim(), "Flies high.");
	assert!(resolver.settings().directory.enable);
	assert!(resolver.exclude_dirs().contains("venv"));

	Ok(())
}

#[test]
fn init_keeps_existing_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "readgen.toml", "intro = \"mine\"\n")?;

	common::readgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("already exists"));

	let content = std::fs::read_to_string(tmp.path().join("readgen.toml"))?;
	assert_eq!(content, "intro = \"mine\"\n");

	Ok(())
}

#[test]
fn init_then_generate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"pyproject.toml",
		"[project]\nname = \"kite\"\ndescription = \"Flies high.\"\n",
	)?;

	common::readgen_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::readgen_cmd()
		.arg("generate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::starts_with("# kite\n\nFlies high.\n\n"));

	Ok(())
}
