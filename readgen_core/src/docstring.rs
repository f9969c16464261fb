use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::ReadgenResult;

/// Package marker whose doc string describes the enclosing directory.
pub const PACKAGE_INIT_FILE: &str = "__init__.py";

/// Extensions of source files that may open with a doc string.
pub const DOCSTRING_EXTENSIONS: &[&str] = &["py", "pyi"];

const DOCSTRING_QUOTES: &[&str] = &["\"\"\"", "'''"];

static DOCSTRING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?s)"""(.*?)"""|'''(.*?)'''"#)
		.unwrap_or_else(|e| panic!("invalid docstring pattern: {e}"))
});

/// Extract the first triple-quoted block in `content`, trimmed. Empty blocks
/// count as no doc string.
pub fn extract_docstring(content: &str) -> Option<String> {
	let captures = DOCSTRING_PATTERN.captures(content)?;
	let body = captures.get(1).or_else(|| captures.get(2))?.as_str().trim();

	if body.is_empty() {
		None
	} else {
		Some(body.to_string())
	}
}

/// Read a package-init file and extract its doc string. Read failures are
/// logged and treated as a missing doc string.
pub fn read_package_doc(path: &Path) -> Option<String> {
	match std::fs::read_to_string(path) {
		Ok(content) => extract_docstring(&content),
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "failed to read package doc string");
			None
		}
	}
}

/// Single-line summary taken from a doc string opener on the first line, e.g.
/// `"""Parse the config."""` becomes `Parse the config.`.
pub fn first_line_docstring(line: &str) -> Option<String> {
	let line = line.trim();
	if !DOCSTRING_QUOTES.iter().any(|quote| line.starts_with(quote)) {
		return None;
	}

	let summary = line.trim_matches(|c| c == '"' || c == '\'').trim();
	if summary.is_empty() {
		None
	} else {
		Some(summary.to_string())
	}
}

/// Returns true when `path` has an extension that may carry a doc string.
pub fn has_docstring_extension(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| DOCSTRING_EXTENSIONS.contains(&ext))
}

/// Read only the first line of a source file and return its doc string
/// summary. Non-source files are skipped without being opened; read failures
/// are logged.
pub fn read_leading_docstring(path: &Path) -> Option<String> {
	if !has_docstring_extension(path) {
		return None;
	}

	match read_first_line(path) {
		Ok(line) => first_line_docstring(&line),
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "failed to read leading doc string");
			None
		}
	}
}

fn read_first_line(path: &Path) -> ReadgenResult<String> {
	let mut reader = BufReader::new(File::open(path)?);
	let mut line = String::new();
	reader.read_line(&mut line)?;

	Ok(line)
}
