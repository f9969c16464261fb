use std::path::Path;

use crate::config::EnvSettings;

/// A variable documented in the example environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
	pub key: String,
	pub description: String,
}

/// Parse `KEY=value # description` lines. Blank lines and comment lines are
/// skipped.
pub fn parse_env_example(content: &str) -> Vec<EnvVar> {
	content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(|line| {
			let key = line.split('=').next().unwrap_or_default().trim();
			let description = line.split('#').nth(1).unwrap_or_default().trim();

			EnvVar {
				key: key.to_string(),
				description: description.to_string(),
			}
		})
		.collect()
}

/// Read the configured example environment file below `root`. A missing file
/// yields no variables; read failures are logged.
pub fn load_env_vars(root: &Path, settings: &EnvSettings) -> Vec<EnvVar> {
	let path = root.join(&settings.env_file);
	if !path.is_file() {
		return Vec::new();
	}

	match std::fs::read_to_string(&path) {
		Ok(content) => parse_env_example(&content),
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "failed to read environment file");
			Vec::new()
		}
	}
}
