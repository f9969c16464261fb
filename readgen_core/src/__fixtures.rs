use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

/// Write `content` to `rel_path` below `root`, creating parent directories.
pub fn write_file(root: &Path, rel_path: &str, content: &str) {
	let path = root.join(rel_path);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

/// Create every directory in `rel_paths` below `root`.
pub fn create_dirs(root: &Path, rel_paths: &[&str]) {
	for rel_path in rel_paths {
		std::fs::create_dir_all(root.join(rel_path))
			.unwrap_or_else(|e| panic!("create_dir_all {rel_path}: {e}"));
	}
}

pub fn tempdir() -> TempDir {
	tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"))
}

/// A temporary directory with a stable-named project root inside it, so the
/// root name in rendered trees is predictable.
pub fn named_project(name: &str) -> (TempDir, PathBuf) {
	let tmp = tempdir();
	let root = tmp.path().join(name);
	std::fs::create_dir_all(&root).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	(tmp, root)
}

pub fn demo_metadata() -> Value {
	json!({
		"project": {
			"name": "demo",
			"version": "1.2.0",
			"requires-python": ">=3.11",
			"keywords": ["cli", "docs"],
			"authors": [
				{ "name": "Ada", "email": "ada@example.com" },
				{ "name": "Grace" }
			],
			"license": { "text": "MIT" },
			"classifiers": [],
			"dynamic": null,
			"private": false,
			"stars": 42
		}
	})
}

pub fn config_table(source: &str) -> toml::Table {
	toml::from_str(source).unwrap_or_else(|e| panic!("config: {e}"))
}
