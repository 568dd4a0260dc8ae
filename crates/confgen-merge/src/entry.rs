//! Parsing of override lines into key/value entries.
//!
//! A line is split at the first occurrence of the first separator (in
//! priority order) that appears anywhere in it. Blank lines and full-line
//! `#` comments are ignored; lines containing no separator are skipped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single `key <separator> value` pair taken from a requested config line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// The key, with surrounding whitespace removed.
    pub key: String,
    /// The separator that matched when the line was split.
    pub separator: String,
    /// Everything after the separator, with surrounding whitespace removed.
    /// Inline comments are part of the value.
    pub value: String,
}

impl ConfigEntry {
    /// Create an entry from its parts.
    pub fn new(
        key: impl Into<String>,
        separator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            separator: separator.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.separator, self.value)
    }
}

/// Returns `true` for lines that carry no entry: blank lines and full-line
/// comments.
pub fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a single line into an entry.
///
/// Returns `None` for blank lines, comments, and lines in which none of the
/// separators occurs. Empty separators never match.
///
/// # Examples
///
/// ```
/// use confgen_merge::parse_line;
///
/// let entry = parse_line("max_connections =150", &["=", " "]).unwrap();
/// assert_eq!(entry.key, "max_connections");
/// assert_eq!(entry.value, "150");
/// assert_eq!(entry.to_string(), "max_connections=150");
///
/// assert!(parse_line("# a comment = 1", &["="]).is_none());
/// assert!(parse_line("no_separator_here", &["="]).is_none());
/// ```
pub fn parse_line<S: AsRef<str>>(line: &str, separators: &[S]) -> Option<ConfigEntry> {
    if is_ignorable(line) {
        return None;
    }
    let line = line.trim();

    let separator = separators
        .iter()
        .map(AsRef::as_ref)
        .find(|sep| !sep.is_empty() && line.contains(*sep))?;
    let (key, value) = line.split_once(separator)?;

    Some(ConfigEntry::new(key.trim(), separator, value.trim()))
}

/// Parse every line of `text`, keeping entries in source order.
///
/// Duplicate keys are kept as-is.
pub fn parse_entries<S: AsRef<str>>(text: &str, separators: &[S]) -> Vec<ConfigEntry> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        match parse_line(line, separators) {
            Some(entry) => entries.push(entry),
            None => debug!(line = index + 1, "skipping override line without a known separator"),
        }
    }
    entries
}
