use std::path::Path;
use std::path::PathBuf;

use crate::ReadgenResult;
use crate::config::ConfigResolver;
use crate::config::ConfigSources;
use crate::config::ContentBlock;
use crate::env_file::EnvVar;
use crate::env_file::load_env_vars;
use crate::scanner::DirectoryScanner;
use crate::tree::TreeRenderer;

/// Last line of every generated document.
pub const FOOTER: &str = "This document was automatically generated.";

/// Returned by [`ReadmeGenerator::generate`] in place of a document when
/// generation fails.
pub const GENERATION_FAILURE_MESSAGE: &str =
	"Unable to generate README content. Please check the error message.";

pub const ENV_SECTION_TITLE: &str = "Environment Variables";

/// Builds the README for one project root.
///
/// Configuration is loaded once on construction. Every call to
/// [`generate`](Self::generate) rescans the filesystem.
#[derive(Debug, Clone)]
pub struct ReadmeGenerator {
	config: ConfigResolver,
	output: Option<PathBuf>,
}

impl ReadmeGenerator {
	/// Load `readgen.toml` and `pyproject.toml` from `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self::with_sources(root, &ConfigSources::default())
	}

	pub fn with_sources(root: impl Into<PathBuf>, sources: &ConfigSources) -> Self {
		let root = root.into();
		Self::from_config(ConfigResolver::load_with(&root, sources))
	}

	pub fn from_config(config: ConfigResolver) -> Self {
		Self {
			config,
			output: None,
		}
	}

	/// Record where the document will be written, relative to the root. The
	/// file is omitted from the directory tree.
	#[must_use]
	pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
		self.output = Some(self.root().join(output));
		self
	}

	pub fn config(&self) -> &ConfigResolver {
		&self.config
	}

	pub fn root(&self) -> &Path {
		self.config.root()
	}

	/// Produce the document. Failures are logged and replaced by
	/// [`GENERATION_FAILURE_MESSAGE`], so this never errors.
	pub fn generate(&self) -> String {
		document_or_failure(self.try_generate())
	}

	/// Produce the document, surfacing the first unrecovered error.
	pub fn try_generate(&self) -> ReadgenResult<String> {
		let settings = self.config.settings();
		let mut lines: Vec<String> = Vec::new();

		for block in self.config.content_blocks() {
			push_content_block(&mut lines, block);
		}

		if settings.env.enable {
			let env_vars = load_env_vars(self.root(), &settings.env);
			push_env_table(&mut lines, &env_vars);
		}

		if settings.directory.enable {
			let entries = DirectoryScanner::new(self.root(), &settings.directory).scan();
			if !entries.is_empty() {
				let tree = TreeRenderer::new(self.root(), &settings.directory)
					.omitting(self.output.as_deref())
					.render()?;
				push_tree(
					&mut lines,
					&settings.directory.title,
					&root_name(self.root()),
					tree,
				);
			}
		}

		if !lines.is_empty() {
			lines.push("---".to_string());
			lines.push(String::new());
		}
		lines.push(FOOTER.to_string());

		let mut document = lines.join("\n");
		document.push('\n');
		Ok(document)
	}
}

/// Map a generation result to the document or the fixed failure message.
pub fn document_or_failure(result: ReadgenResult<String>) -> String {
	result.unwrap_or_else(|error| {
		tracing::warn!(%error, "failed to generate README");
		GENERATION_FAILURE_MESSAGE.to_string()
	})
}

fn push_content_block(lines: &mut Vec<String>, block: &ContentBlock) {
	lines.push(format!("# {}", block.title));
	lines.push(String::new());

	let content = block.content.trim_end();
	if !content.is_empty() {
		lines.push(content.to_string());
		lines.push(String::new());
	}
}

fn push_env_table(lines: &mut Vec<String>, env_vars: &[EnvVar]) {
	if env_vars.is_empty() {
		return;
	}

	lines.push(format!("# {ENV_SECTION_TITLE}"));
	lines.push(String::new());
	lines.push("| Variable Name | Description |".to_string());
	lines.push("| --- | --- |".to_string());
	for var in env_vars {
		lines.push(format!("| {} | {} |", var.key, var.description));
	}
	lines.push(String::new());
}

fn push_tree(lines: &mut Vec<String>, title: &str, root_name: &str, tree: Vec<String>) {
	lines.push(format!("# {title}"));
	lines.push(String::new());
	lines.push("```".to_string());
	lines.push(format!("{root_name}/"));
	lines.extend(tree);
	lines.push("```".to_string());
	lines.push(String::new());
}

/// Display name of the project root, resolving `.` and similar paths.
pub fn root_name(root: &Path) -> String {
	let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
	resolved
		.file_name()
		.map_or_else(|| ".".to_string(), |name| name.to_string_lossy().into_owned())
}
