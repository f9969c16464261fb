#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn readgen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("readgen"));
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Write `content` to `rel_path` below `root`, creating parent directories.
pub fn write_file(root: &Path, rel_path: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(rel_path);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// A small Python project with a manifest, config, package and env file.
pub fn sample_project(root: &Path) -> std::io::Result<()> {
	write_file(
		root,
		"pyproject.toml",
		"[project]\nname = \"shop\"\nversion = \"0.4.0\"\ndescription = \"A tiny shop.\"\n",
	)?;
	write_file(
		root,
		"readgen.toml",
		"[introduction]\ntitle = \"${project.name}\"\ncontent = \"${project.description}\"\n\n[directory]\nexclude_dirs = [\"dist\"]\n",
	)?;
	write_file(root, "shop/__init__.py", "\"\"\"Shop package.\"\"\"\n")?;
	write_file(root, "shop/cart.py", "\"\"\"Shopping cart.\"\"\"\n")?;
	write_file(root, "dist/shop.whl", "binary\n")?;
	write_file(root, ".env.example", "SHOP_DB=sqlite:// # Database URL\n")
}
