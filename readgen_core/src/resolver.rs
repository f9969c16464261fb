use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;
use serde_json::Value;

/// Matches `${reference}` placeholders. The reference is everything up to the
/// first closing brace.
static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid variable pattern: {e}"))
});

/// A single step when walking a reference like `project.authors[0].name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
	/// Mapping lookup by key.
	Key(&'a str),
	/// Sequence lookup by position. Negative values count from the end.
	Index(i64),
}

/// Split a dotted/indexed reference into lookup steps.
///
/// `authors[0]` becomes `Key("authors"), Index(0)`. Chained indices such as
/// `matrix[1][0]` are accepted. Returns `None` for references that cannot be
/// parsed (empty segments, unclosed brackets, non-integer indices).
pub fn parse_reference(reference: &str) -> Option<Vec<PathStep<'_>>> {
	let reference = reference.trim();
	if reference.is_empty() {
		return None;
	}

	let mut steps = Vec::new();

	for segment in reference.split('.') {
		let (name, mut rest) = match segment.find('[') {
			Some(bracket) => (&segment[..bracket], &segment[bracket..]),
			None => (segment, ""),
		};

		if name.is_empty() && rest.is_empty() {
			return None;
		}

		if !name.is_empty() {
			steps.push(PathStep::Key(name));
		}

		while !rest.is_empty() {
			let inner = rest.strip_prefix('[')?;
			let close = inner.find(']')?;
			let index = inner[..close].trim().parse::<i64>().ok()?;
			steps.push(PathStep::Index(index));
			rest = &inner[close + 1..];
		}
	}

	Some(steps)
}

/// Walk `root` along `reference`. Any missing key, out-of-range index, or
/// container mismatch yields `None`.
pub fn resolve_path<'v>(root: &'v Value, reference: &str) -> Option<&'v Value> {
	let steps = parse_reference(reference)?;
	let mut current = root;

	for step in steps {
		current = match (step, current) {
			(PathStep::Key(key), Value::Object(map)) => map.get(key)?,
			(PathStep::Index(index), Value::Array(items)) => {
				let position = if index < 0 {
					items
						.len()
						.checked_sub(usize::try_from(index.unsigned_abs()).ok()?)?
				} else {
					usize::try_from(index).ok()?
				};
				items.get(position)?
			}
			_ => return None,
		};
	}

	Some(current)
}

/// Canonical text for a resolved value.
///
/// Strings are emitted verbatim, `null` as the empty string, and sequences or
/// mappings as compact JSON.
pub fn value_to_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
	}
}

/// Resolve `reference` against `root` and stringify it, or return an empty
/// string when it does not resolve.
pub fn resolve_variable(root: &Value, reference: &str) -> String {
	resolve_path(root, reference)
		.map(value_to_text)
		.unwrap_or_default()
}

/// Replace every `${reference}` in `text` with its resolved value.
///
/// This is a single left-to-right pass: substituted values are not scanned
/// again, so metadata containing `${...}` is emitted literally.
pub fn substitute_variables<'t>(text: &'t str, root: &Value) -> Cow<'t, str> {
	VARIABLE_PATTERN.replace_all(text, |captures: &Captures<'_>| {
		let reference = captures.get(1).map_or("", |m| m.as_str());
		let resolved = resolve_variable(root, reference);
		if resolved.is_empty() {
			tracing::debug!(reference, "variable did not resolve");
		}
		resolved
	})
}
