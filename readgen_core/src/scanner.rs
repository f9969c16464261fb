use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::ReadgenError;
use crate::ReadgenResult;
use crate::config::DirectorySettings;
use crate::docstring::PACKAGE_INIT_FILE;
use crate::docstring::read_package_doc;

/// A visible directory below the project root, optionally carrying the doc
/// string of its package-init file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
	/// Path relative to the project root, `/`-separated.
	pub relative_path: String,
	pub doc: Option<String>,
}

/// Result of the walk phase: every visible directory keyed by its relative
/// path, plus the package-init files found along the way. `ancestors` holds
/// the canonical paths of the directories currently being walked.
#[derive(Debug, Default)]
struct WalkState {
	entries: BTreeMap<String, Option<String>>,
	init_files: Vec<(String, PathBuf)>,
	ancestors: HashSet<PathBuf>,
}

/// One exclusion- and depth-aware traversal of a project tree.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryScanner<'a> {
	root: &'a Path,
	settings: &'a DirectorySettings,
}

impl<'a> DirectoryScanner<'a> {
	pub fn new(root: &'a Path, settings: &'a DirectorySettings) -> Self {
		Self { root, settings }
	}

	/// Scan the project, returning entries sorted by relative path. A failure
	/// of the traversal itself is logged and yields an empty list.
	pub fn scan(&self) -> Vec<DirectoryEntry> {
		self.try_scan().unwrap_or_else(|error| {
			tracing::warn!(root = %self.root.display(), %error, "directory scan failed");
			Vec::new()
		})
	}

	/// Scan the project, surfacing a failure to read the root directory.
	pub fn try_scan(&self) -> ReadgenResult<Vec<DirectoryEntry>> {
		let mut state = WalkState::default();
		self.walk(self.root, "", &mut state)?;

		Ok(attach_docs(state))
	}

	fn walk(&self, dir: &Path, rel_path: &str, state: &mut WalkState) -> ReadgenResult<()> {
		let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
		if !state.ancestors.insert(canonical.clone()) {
			tracing::warn!(path = %dir.display(), "skipping directory that links to its own ancestor");
			return Ok(());
		}

		let result = self.walk_children(dir, rel_path, state);
		state.ancestors.remove(&canonical);

		result
	}

	fn walk_children(&self, dir: &Path, rel_path: &str, state: &mut WalkState) -> ReadgenResult<()> {
		let read_dir = std::fs::read_dir(dir).map_err(|e| {
			ReadgenError::DirectoryRead {
				path: dir.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		let mut subdirs = Vec::new();
		for entry in read_dir {
			let entry = entry?;
			let path = entry.path();
			let name = entry.file_name().to_string_lossy().into_owned();

			if path.is_dir() {
				subdirs.push((name, path));
			} else if name == PACKAGE_INIT_FILE {
				state.init_files.push((rel_path.to_string(), path));
			}
		}
		subdirs.sort();

		for (name, path) in subdirs {
			if self.settings.is_excluded_segment(&name) {
				tracing::debug!(path = %path.display(), "skipping excluded directory");
				continue;
			}

			let child_rel = join_relative(rel_path, &name);
			if !self.settings.depth_limits.allows(&child_rel) {
				tracing::debug!(path = %child_rel, "skipping directory beyond depth limit");
				continue;
			}

			state.entries.insert(child_rel.clone(), None);

			if let Err(error) = self.walk(&path, &child_rel, state) {
				tracing::warn!(path = %path.display(), %error, "failed to scan directory");
			}
		}

		Ok(())
	}
}

/// Second phase: attach package doc strings to the visited directories by
/// relative path. Init files whose directory is not an entry (the project
/// root) are ignored.
fn attach_docs(state: WalkState) -> Vec<DirectoryEntry> {
	let WalkState {
		mut entries,
		init_files,
		..
	} = state;

	for (rel_path, init_file) in init_files {
		let Some(doc) = entries.get_mut(&rel_path) else {
			continue;
		};
		*doc = read_package_doc(&init_file);
	}

	entries
		.into_iter()
		.map(|(relative_path, doc)| DirectoryEntry { relative_path, doc })
		.collect()
}

/// Join a root-relative path and a child name with `/`.
pub(crate) fn join_relative(parent: &str, name: &str) -> String {
	if parent.is_empty() {
		name.to_string()
	} else {
		format!("{parent}/{name}")
	}
}
