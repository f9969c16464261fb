use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::ReadgenError;
use crate::ReadgenResult;
use crate::resolver::substitute_variables;

/// Default generator configuration file, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "readgen.toml";
/// Default project manifest, relative to the project root.
pub const MANIFEST_FILE_NAME: &str = "pyproject.toml";
/// Reserved section holding the directory scan and tree settings.
pub const DIRECTORY_SECTION: &str = "directory";
/// Reserved section holding the environment table settings.
pub const ENV_SECTION: &str = "env";

pub const DEFAULT_DIRECTORY_TITLE: &str = "Directory Structure";
pub const DEFAULT_ENV_FILE: &str = ".env.example";

/// Settings for the directory scan and the rendered tree.
///
/// ```toml
/// [directory]
/// enable = true
/// title = "Directory Structure"
/// show_files = true
/// show_docstrings = true
/// exclude_dirs = ["node_modules", "dist"]
/// depth_limits = { "src" = 1, "src/app/models" = 0 }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DirectorySettings {
	/// Whether the directory section is generated at all.
	pub enable: bool,
	/// Heading used for the directory section.
	pub title: String,
	/// List files in the tree, not only directories.
	pub show_files: bool,
	/// Append the leading doc string of Python files to their tree line.
	pub show_docstrings: bool,
	/// Path segments that hide a directory (and its subtree) or a file when
	/// they match exactly.
	pub exclude_dirs: BTreeSet<String>,
	/// Per-prefix limits on how deep below the prefix the walk may go.
	pub depth_limits: DepthLimits,
}

impl Default for DirectorySettings {
	fn default() -> Self {
		Self {
			enable: true,
			title: DEFAULT_DIRECTORY_TITLE.to_string(),
			show_files: true,
			show_docstrings: true,
			exclude_dirs: BTreeSet::new(),
			depth_limits: DepthLimits::default(),
		}
	}
}

impl DirectorySettings {
	/// Returns true when `segment` is hidden or explicitly excluded.
	pub fn is_excluded_segment(&self, segment: &str) -> bool {
		segment.starts_with(HIDDEN_PREFIX) || self.exclude_dirs.contains(segment)
	}
}

/// Marker that hides any path segment starting with it.
pub const HIDDEN_PREFIX: char = '.';

/// Settings for the environment variable table.
///
/// ```toml
/// [env]
/// enable = true
/// env_file = ".env.example"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EnvSettings {
	pub enable: bool,
	/// Example environment file, relative to the project root.
	pub env_file: PathBuf,
}

impl Default for EnvSettings {
	fn default() -> Self {
		Self {
			enable: true,
			env_file: PathBuf::from(DEFAULT_ENV_FILE),
		}
	}
}

/// System settings extracted from the reserved sections of `readgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
	pub directory: DirectorySettings,
	pub env: EnvSettings,
}

impl Settings {
	/// Settings used when no generator config could be loaded. Only the
	/// footer is generated.
	pub fn unconfigured() -> Self {
		Self {
			directory: DirectorySettings {
				enable: false,
				..DirectorySettings::default()
			},
			env: EnvSettings {
				enable: false,
				..EnvSettings::default()
			},
		}
	}
}

/// Depth limits keyed by a root-relative path prefix.
///
/// When several prefixes are ancestors of a path the longest one wins. The
/// remaining depth of a path is the number of segments strictly below the
/// matched prefix, and the path is visible while that number does not exceed
/// the limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, usize>")]
pub struct DepthLimits(BTreeMap<String, usize>);

impl From<BTreeMap<String, usize>> for DepthLimits {
	fn from(limits: BTreeMap<String, usize>) -> Self {
		limits.into_iter().collect()
	}
}

impl<K: AsRef<str>> FromIterator<(K, usize)> for DepthLimits {
	fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(prefix, limit)| (normalize_prefix(prefix.as_ref()), limit))
				.collect(),
		)
	}
}

impl DepthLimits {
	/// Find the most specific prefix governing `rel_path` together with its
	/// limit. An empty prefix (configured as `"."` or `""`) applies to every
	/// path.
	pub fn matching_prefix<'a>(&'a self, rel_path: &'a str) -> Option<(&'a str, usize)> {
		let rel_path = rel_path.trim_matches('/');
		let mut matched = self.0.get("").map(|limit| ("", *limit));
		let mut end = 0;

		for segment in rel_path.split('/') {
			end += segment.len();
			let prefix = &rel_path[..end];
			if let Some(limit) = self.0.get(prefix) {
				matched = Some((prefix, *limit));
			}
			// Skip the separator.
			end += 1;
		}

		matched
	}

	/// Check whether `rel_path` is within the depth allowed by its governing
	/// prefix. Paths without a matching prefix are always allowed.
	pub fn allows(&self, rel_path: &str) -> bool {
		let rel_path = rel_path.trim_matches('/');
		let Some((prefix, limit)) = self.matching_prefix(rel_path) else {
			return true;
		};

		remaining_depth(rel_path, prefix) <= limit
	}
}

/// Number of path segments in `rel_path` strictly below `prefix`. When
/// `prefix` is not a prefix of `rel_path` every segment counts.
pub fn remaining_depth(rel_path: &str, prefix: &str) -> usize {
	let remaining = rel_path
		.strip_prefix(prefix)
		.unwrap_or(rel_path)
		.trim_matches('/');
	if remaining.is_empty() {
		0
	} else {
		remaining.split('/').count()
	}
}

fn normalize_prefix(prefix: &str) -> String {
	let prefix = prefix.replace('\\', "/");
	let prefix = prefix.trim_start_matches("./");
	let prefix = prefix.trim_matches('/');
	if prefix == "." {
		String::new()
	} else {
		prefix.to_string()
	}
}

/// A titled section contributed by `readgen.toml`, with variables already
/// substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
	/// The top-level key the block was defined under.
	pub name: String,
	pub title: String,
	pub content: String,
}

/// The two accepted shapes of a content block.
///
/// ```toml
/// introduction = "Plain content, titled by its key."
///
/// [usage]
/// title = "Using ${project.name}"
/// content = "pip install ${project.name}"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawContentBlock {
	Plain(String),
	Structured {
		#[serde(default)]
		title: Option<String>,
		#[serde(default)]
		content: Option<String>,
	},
}

impl RawContentBlock {
	fn normalize(self, name: &str, metadata: &Value) -> ContentBlock {
		let (title, content) = match self {
			Self::Plain(content) => (name.to_string(), content),
			Self::Structured { title, content } => {
				(
					title.unwrap_or_else(|| name.to_string()),
					content.unwrap_or_default(),
				)
			}
		};

		ContentBlock {
			name: name.to_string(),
			title: substitute_variables(&title, metadata).into_owned(),
			content: substitute_variables(&content, metadata).into_owned(),
		}
	}
}

/// Locations of the configuration and manifest files. Relative paths are
/// resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
	pub config: PathBuf,
	pub manifest: PathBuf,
}

impl Default for ConfigSources {
	fn default() -> Self {
		Self {
			config: PathBuf::from(CONFIG_FILE_NAME),
			manifest: PathBuf::from(MANIFEST_FILE_NAME),
		}
	}
}

/// Loaded project metadata, settings, and resolved content blocks for one
/// project root. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
	root: PathBuf,
	metadata: Value,
	settings: Settings,
	content_blocks: Vec<ContentBlock>,
}

impl ConfigResolver {
	/// Load `readgen.toml` and `pyproject.toml` from `root`.
	pub fn load(root: &Path) -> Self {
		Self::load_with(root, &ConfigSources::default())
	}

	/// Load configuration from explicit sources. Missing or malformed files
	/// are logged and replaced with defaults, so this never fails.
	pub fn load_with(root: &Path, sources: &ConfigSources) -> Self {
		let manifest_path = root.join(&sources.manifest);
		let metadata = match load_manifest(&manifest_path) {
			Ok(Some(metadata)) => metadata,
			Ok(None) => {
				tracing::debug!(path = %manifest_path.display(), "no project manifest found");
				empty_metadata()
			}
			Err(error) => {
				tracing::warn!(path = %manifest_path.display(), %error, "failed to read project manifest");
				empty_metadata()
			}
		};

		let config_path = root.join(&sources.config);
		match load_config_table(&config_path) {
			Ok(Some(table)) => Self::from_parts(root, metadata, table),
			Ok(None) => {
				tracing::debug!(path = %config_path.display(), "no generator config found");
				Self::unconfigured(root, metadata)
			}
			Err(error) => {
				tracing::warn!(path = %config_path.display(), %error, "failed to read generator config");
				Self::unconfigured(root, metadata)
			}
		}
	}

	/// A resolver for a project without a usable generator config: no content
	/// blocks and every optional section disabled.
	pub fn unconfigured(root: &Path, metadata: Value) -> Self {
		Self {
			root: root.to_path_buf(),
			metadata,
			settings: Settings::unconfigured(),
			content_blocks: Vec::new(),
		}
	}

	/// Build a resolver from already parsed metadata and configuration. Absent
	/// reserved sections take their defaults.
	pub fn from_parts(root: &Path, metadata: Value, config: toml::Table) -> Self {
		let mut directory = None;
		let mut env = None;
		let mut content_blocks = Vec::new();

		for (name, value) in config {
			match name.as_str() {
				DIRECTORY_SECTION => directory = Some(value),
				ENV_SECTION => env = Some(value),
				_ => {
					match value.try_into::<RawContentBlock>() {
						Ok(raw) => content_blocks.push(raw.normalize(&name, &metadata)),
						Err(error) => {
							tracing::warn!(section = %name, %error, "skipping content block that is neither a string nor a table");
						}
					}
				}
			}
		}

		let settings = Settings {
			directory: parse_section(directory, DIRECTORY_SECTION),
			env: parse_section(env, ENV_SECTION),
		};

		Self {
			root: root.to_path_buf(),
			metadata,
			settings,
			content_blocks,
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn metadata(&self) -> &Value {
		&self.metadata
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Content blocks in the order they appear in the configuration file.
	pub fn content_blocks(&self) -> &[ContentBlock] {
		&self.content_blocks
	}

	pub fn exclude_dirs(&self) -> &BTreeSet<String> {
		&self.settings.directory.exclude_dirs
	}

	pub fn depth_limits(&self) -> &DepthLimits {
		&self.settings.directory.depth_limits
	}
}

fn empty_metadata() -> Value {
	Value::Object(serde_json::Map::new())
}

/// Deserialize a reserved section. An absent section takes its defaults; an
/// invalid field falls back to its own default while the valid fields are
/// kept.
fn parse_section<T>(value: Option<toml::Value>, name: &str) -> T
where
	T: Default + for<'de> Deserialize<'de>,
{
	let Some(value) = value else {
		return T::default();
	};

	let toml::Value::Table(table) = value else {
		tracing::warn!(section = name, "settings section is not a table, using defaults");
		return T::default();
	};

	if let Ok(settings) = toml::Value::Table(table.clone()).try_into::<T>() {
		return settings;
	}

	let mut valid = toml::Table::new();
	for (key, field) in table {
		let mut single = toml::Table::new();
		single.insert(key.clone(), field.clone());
		match toml::Value::Table(single).try_into::<T>() {
			Ok(_) => {
				valid.insert(key, field);
			}
			Err(error) => {
				tracing::warn!(section = name, field = %key, %error, "invalid setting, using its default");
			}
		}
	}

	toml::Value::Table(valid).try_into::<T>().unwrap_or_default()
}

/// Read and parse the generator configuration. Returns `None` if the file
/// does not exist.
pub fn load_config_table(path: &Path) -> ReadgenResult<Option<toml::Table>> {
	if !path.is_file() {
		return Ok(None);
	}

	let content = std::fs::read_to_string(path)?;
	let table: toml::Table =
		toml::from_str(&content).map_err(|e| ReadgenError::ConfigParse(e.to_string()))?;

	Ok(Some(table))
}

/// Read the project manifest into a `serde_json::Value`, choosing the parser
/// from the file extension. Returns `None` if the file does not exist.
pub fn load_manifest(path: &Path) -> ReadgenResult<Option<Value>> {
	if !path.is_file() {
		return Ok(None);
	}

	let content = std::fs::read_to_string(path).map_err(|e| {
		ReadgenError::DataFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	parse_data_file(&content, &format, &path.display().to_string()).map(Some)
}

/// Parse manifest content into a `serde_json::Value` based on its format.
pub fn parse_data_file(content: &str, format: &str, path_display: &str) -> ReadgenResult<Value> {
	match format {
		"json" => {
			serde_json::from_str(content).map_err(|e| {
				ReadgenError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})
		}
		"toml" => {
			let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
				ReadgenError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?;
			Ok(toml_to_json(toml_value))
		}
		"yaml" | "yml" => {
			serde_yaml_ng::from_str(content).map_err(|e| {
				ReadgenError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})
		}
		other => Err(ReadgenError::UnsupportedDataFormat(other.to_string())),
	}
}

/// Convert a `toml::Value` to a `serde_json::Value`. Floats without a JSON
/// representation (`inf`, `nan`) become their text form.
fn toml_to_json(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => {
			serde_json::Number::from_f64(f).map_or_else(|| Value::String(f.to_string()), Value::Number)
		}
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => {
			Value::Object(
				table
					.into_iter()
					.map(|(k, v)| (k, toml_to_json(v)))
					.collect(),
			)
		}
	}
}
