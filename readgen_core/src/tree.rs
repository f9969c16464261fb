use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::ReadgenError;
use crate::ReadgenResult;
use crate::config::DirectorySettings;
use crate::docstring::read_leading_docstring;
use crate::scanner::join_relative;

/// Connector for every sibling except the last.
pub const BRANCH: &str = "├── ";
/// Connector for the last sibling.
pub const LAST_BRANCH: &str = "└── ";
/// Child indentation below a non-last sibling.
pub const PIPE_INDENT: &str = "│   ";
/// Child indentation below the last sibling.
pub const SPACE_INDENT: &str = "    ";

#[derive(Debug)]
struct Child {
	name: String,
	path: PathBuf,
	is_dir: bool,
}

/// Renders a project directory as box-drawing tree lines.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
	root: &'a Path,
	settings: &'a DirectorySettings,
	omit_file: Option<&'a Path>,
}

impl<'a> TreeRenderer<'a> {
	pub fn new(root: &'a Path, settings: &'a DirectorySettings) -> Self {
		Self {
			root,
			settings,
			omit_file: None,
		}
	}

	/// Leave `file` out of the tree. Used for the document being generated,
	/// so that writing it does not change the next rendering.
	#[must_use]
	pub fn omitting(mut self, file: Option<&'a Path>) -> Self {
		self.omit_file = file;
		self
	}

	/// Render the children of the root, depth first. The root line itself is
	/// not included.
	pub fn render(&self) -> ReadgenResult<Vec<String>> {
		let mut lines = Vec::new();
		let mut ancestors = HashSet::new();
		self.render_dir(self.root, "", "", &mut lines, &mut ancestors)?;

		Ok(lines)
	}

	fn render_dir(
		&self,
		dir: &Path,
		rel_path: &str,
		prefix: &str,
		lines: &mut Vec<String>,
		ancestors: &mut HashSet<PathBuf>,
	) -> ReadgenResult<()> {
		// A directory linking back to one of its ancestors is listed but not
		// expanded again.
		let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
		if !ancestors.insert(canonical.clone()) {
			return Ok(());
		}

		let result = self.render_children(dir, rel_path, prefix, lines, ancestors);
		ancestors.remove(&canonical);

		result
	}

	fn render_children(
		&self,
		dir: &Path,
		rel_path: &str,
		prefix: &str,
		lines: &mut Vec<String>,
		ancestors: &mut HashSet<PathBuf>,
	) -> ReadgenResult<()> {
		let children = self.visible_children(dir, rel_path)?;
		let count = children.len();

		for (index, child) in children.into_iter().enumerate() {
			let is_last = index + 1 == count;
			let connector = if is_last { LAST_BRANCH } else { BRANCH };
			lines.push(format!("{prefix}{connector}{}", self.label(&child)));

			if child.is_dir {
				let extension = if is_last { SPACE_INDENT } else { PIPE_INDENT };
				let child_rel = join_relative(rel_path, &child.name);
				self.render_dir(
					&child.path,
					&child_rel,
					&format!("{prefix}{extension}"),
					lines,
					ancestors,
				)?;
			}
		}

		Ok(())
	}

	/// List the children of `dir` that survive exclusion, file display and
	/// depth rules, sorted by name.
	fn visible_children(&self, dir: &Path, rel_path: &str) -> ReadgenResult<Vec<Child>> {
		let read_dir = std::fs::read_dir(dir).map_err(|e| {
			ReadgenError::DirectoryRead {
				path: dir.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		let mut children = Vec::new();
		for entry in read_dir {
			let entry = entry?;
			let path = entry.path();
			let name = entry.file_name().to_string_lossy().into_owned();
			let is_dir = path.is_dir();

			if self.settings.is_excluded_segment(&name) || self.omit_file == Some(path.as_path()) {
				continue;
			}

			if is_dir {
				if !self
					.settings
					.depth_limits
					.allows(&join_relative(rel_path, &name))
				{
					continue;
				}
			} else if !self.settings.show_files {
				continue;
			}

			children.push(Child { name, path, is_dir });
		}

		children.sort_by(|a, b| a.name.cmp(&b.name));
		Ok(children)
	}

	fn label(&self, child: &Child) -> String {
		if child.is_dir {
			return format!("{}/", child.name);
		}

		if self.settings.show_docstrings {
			if let Some(doc) = read_leading_docstring(&child.path) {
				return format!("{} # {doc}", child.name);
			}
		}

		child.name.clone()
	}
}
