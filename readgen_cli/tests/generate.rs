use predicates::prelude::*;
use readgen_core::AnyEmptyResult;

mod common;

#[test]
fn generate_writes_readme() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = tmp.path().join("shop-repo");
	common::sample_project(&root)?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--path")
		.arg(&root)
		.assert()
		.success()
		.stdout(predicate::str::contains("Generated"));

	let content = std::fs::read_to_string(root.join("README.md"))?;
	assert!(content.starts_with("# shop\n\nA tiny shop.\n"));
	assert!(content.contains("| SHOP_DB | Database URL |"));
	assert!(content.contains("shop-repo/\n"));
	assert!(content.contains("└── shop/\n    ├── __init__.py # Shop package.\n    └── cart.py # Shopping cart.\n"));
	assert!(!content.contains("dist"));
	assert!(content.ends_with("This document was automatically generated.\n"));

	Ok(())
}

#[test]
fn generate_refuses_to_overwrite_without_force() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;
	std::fs::write(tmp.path().join("README.md"), "hand written\n")?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicate::str::contains("--force"));

	let content = std::fs::read_to_string(tmp.path().join("README.md"))?;
	assert_eq!(content, "hand written\n");

	Ok(())
}

#[test]
fn generate_force_overwrites() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;
	std::fs::write(tmp.path().join("README.md"), "hand written\n")?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--force")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(tmp.path().join("README.md"))?;
	assert!(content.starts_with("# shop\n"));

	Ok(())
}

#[test]
fn generate_dry_run_prints_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("# shop"))
		.stdout(predicate::str::contains("└── shop/"));

	assert!(!tmp.path().join("README.md").exists());

	Ok(())
}

#[test]
fn generate_to_custom_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::sample_project(tmp.path())?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--output")
		.arg("docs/OVERVIEW.md")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2);

	std::fs::create_dir_all(tmp.path().join("docs"))?;
	common::readgen_cmd()
		.arg("generate")
		.arg("--output")
		.arg("docs/OVERVIEW.md")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("docs/OVERVIEW.md").is_file());

	Ok(())
}

#[test]
fn generate_with_json_manifest_and_custom_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"package.json",
		r#"{ "name": "widget", "contributors": [{ "name": "Lin" }] }"#,
	)?;
	common::write_file(
		tmp.path(),
		"docs/readme.toml",
		"credits = \"By ${contributors[0].name}\"\n\n[directory]\nenable = false\n",
	)?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--dry-run")
		.arg("--manifest")
		.arg("package.json")
		.arg("--config")
		.arg("docs/readme.toml")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("# credits\n\nBy Lin\n\n---\n\nThis document was automatically generated.\n");

	Ok(())
}

#[test]
fn generate_without_config_prints_footer() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "src/app.py", "\"\"\"App.\"\"\"\n")?;
	common::write_file(tmp.path(), ".env.example", "TOKEN=abc # Access token\n")?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("This document was automatically generated.\n");

	Ok(())
}

#[test]
fn generate_with_malformed_config_still_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "readgen.toml", "[broken\n")?;

	common::readgen_cmd()
		.arg("generate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("This document was automatically generated.\n")
		.stderr(predicate::str::contains("failed to read generator config"));

	Ok(())
}

#[test]
fn missing_subcommand_fails() {
	common::readgen_cmd().assert().code(1);
}
