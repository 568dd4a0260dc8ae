//! Block merge: keep everything before the divider, regenerate the rest.
//!
//! The merged text is always laid out as
//!
//! ```text
//! <retained prefix, trailing newlines removed>
//!
//! <block divider>
//! <entry 1>
//! ...
//! <entry n>
//! ```
//!
//! The previous generated block is discarded wholesale, so keys the user
//! removed from the override disappear on the next merge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{parse_entries, ConfigEntry};
use crate::error::{MergeError, MergeResult};
use crate::request::MergeRequest;

/// Check the divider and separator configuration.
pub fn validate<S: AsRef<str>>(block_divider: &str, separators: &[S]) -> MergeResult<()> {
    if block_divider.is_empty() {
        return Err(MergeError::InvalidBlockDivider);
    }
    if separators.is_empty() {
        return Err(MergeError::InvalidSeparators);
    }
    Ok(())
}

/// Split `current` at the first occurrence of `block_divider`.
///
/// Returns the text before the divider and, when the divider was found, the
/// generated block that follows the divider line. Without a divider the whole
/// text is the prefix.
pub fn split_generated<'a>(current: &'a str, block_divider: &str) -> (&'a str, Option<&'a str>) {
    match current.find(block_divider) {
        Some(index) => {
            let rest = &current[index + block_divider.len()..];
            let block = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest);
            (&current[..index], Some(block))
        }
        None => (current, None),
    }
}

/// Parse the entries of the block currently generated in `current`.
///
/// Returns an empty list when `current` has no generated block.
pub fn generated_entries<S: AsRef<str>>(
    current: &str,
    block_divider: &str,
    separators: &[S],
) -> MergeResult<Vec<ConfigEntry>> {
    validate(block_divider, separators)?;
    Ok(match split_generated(current, block_divider) {
        (_, Some(block)) => parse_entries(block, separators),
        (_, None) => Vec::new(),
    })
}

/// Merge `requested` overrides into `current`.
///
/// Returns `current` unchanged when `requested` holds no parsable entry.
/// Otherwise the result is the part of `current` before `block_divider`
/// followed by a freshly generated block.
///
/// # Examples
///
/// ```
/// use confgen_merge::merge_config;
///
/// let merged = merge_config(
///     "max_connections=300\nshared_buffers=256MB",
///     "max_connections =150\n#This is a comment = hello",
///     "#*****",
///     &["=", " "],
/// )
/// .unwrap();
/// assert_eq!(merged, "max_connections=300\nshared_buffers=256MB\n\n#*****\nmax_connections=150\n");
/// ```
pub fn merge_config<S: AsRef<str>>(
    current: &str,
    requested: &str,
    block_divider: &str,
    separators: &[S],
) -> MergeResult<String> {
    validate(block_divider, separators)?;

    let entries = parse_entries(requested, separators);
    if entries.is_empty() {
        debug!("no override entries; config left unchanged");
        return Ok(current.to_string());
    }

    let (prefix, previous) = split_generated(current, block_divider);
    let prefix = prefix.trim_end_matches(|c: char| c == '\n' || c == '\r');
    debug!(
        entries = entries.len(),
        replaced_block = previous.is_some(),
        "regenerating config block"
    );

    let block = entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    let mut merged =
        String::with_capacity(prefix.len() + block_divider.len() + block.len() + 4);
    merged.push_str(prefix);
    merged.push_str("\n\n");
    merged.push_str(block_divider);
    merged.push('\n');
    merged.push_str(&block);
    merged.push('\n');
    Ok(merged)
}

/// A divider/separator convention applied to many merges.
///
/// Reconcilers hold one of these per config file dialect and call
/// [`ConfigMerger::merge`] on every cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMerger {
    /// Marker that starts the generated block.
    pub block_divider: String,
    /// Key/value separators in priority order.
    pub separators: Vec<String>,
}

impl ConfigMerger {
    /// Create a merger. The convention is checked on every merge, not here.
    pub fn new<I, S>(block_divider: impl Into<String>, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_divider: block_divider.into(),
            separators: separators.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the convention without merging anything.
    pub fn validate(&self) -> MergeResult<()> {
        validate(&self.block_divider, &self.separators)
    }

    /// Merge `requested` into `current` using this convention.
    pub fn merge(&self, current: &str, requested: &str) -> MergeResult<String> {
        merge_config(current, requested, &self.block_divider, &self.separators)
    }

    /// Build a standalone request for this convention.
    pub fn request(
        &self,
        current: impl Into<String>,
        requested: impl Into<String>,
    ) -> MergeRequest {
        MergeRequest::new(
            current,
            requested,
            self.block_divider.clone(),
            self.separators.clone(),
        )
    }

    /// Entries in the block currently generated in `current`.
    pub fn generated_entries(&self, current: &str) -> MergeResult<Vec<ConfigEntry>> {
        generated_entries(current, &self.block_divider, &self.separators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DIVIDER: &str = "#*****";
    const SEPARATORS: &[&str] = &["=", " "];

    fn merge(current: &str, requested: &str) -> String {
        merge_config(current, requested, DIVIDER, SEPARATORS).unwrap()
    }

    #[test]
    fn end_to_end_scenario() {
        let current = "max_connections=300\nshared_buffers=256MB";
        let requested = "max_connections =150\nshared_buffers=255MB #shared_buffers=255MB\n#This is a comment = hello";
        assert_eq!(
            merge(current, requested),
            "max_connections=300\nshared_buffers=256MB\n\n#*****\nmax_connections=150\nshared_buffers=255MB #shared_buffers=255MB\n"
        );
    }

    #[test]
    fn empty_request_returns_current_unchanged() {
        let current = "a=1\n\n#*****\nb=2\n";
        assert_eq!(merge(current, ""), current);
        assert_eq!(merge(current, "# only a comment\n\n   \n"), current);
        assert_eq!(merge(current, "no-separators-here"), current);
        assert_eq!(merge("", ""), "");
    }

    #[test]
    fn stale_block_replaced() {
        let current = "a=1\n\n#*****\nold=1\nremoved=2\n";
        assert_eq!(merge(current, "new=3"), "a=1\n\n#*****\nnew=3\n");
    }

    #[test]
    fn empty_prefix_still_gets_blank_line() {
        assert_eq!(merge("", "k=v"), "\n\n#*****\nk=v\n");
        assert_eq!(merge("#*****\nold=1\n", "k=v"), "\n\n#*****\nk=v\n");
    }

    #[test]
    fn trailing_newlines_normalized() {
        let expected = "a=1\n\n#*****\nk=v\n";
        assert_eq!(merge("a=1", "k=v"), expected);
        assert_eq!(merge("a=1\n", "k=v"), expected);
        assert_eq!(merge("a=1\n\n\n\n", "k=v"), expected);
        assert_eq!(merge("a=1\r\n\r\n", "k=v"), expected);
    }

    #[test]
    fn divider_only_matched_in_current() {
        let merged = merge("a=1", "note = see #***** below");
        assert_eq!(merged, "a=1\n\n#*****\nnote=see #***** below\n");
    }

    #[test]
    fn comment_lines_never_emitted() {
        let merged = merge("", "# first\nk=v\n  # second = x\n");
        assert!(!merged.contains("first"));
        assert!(!merged.contains("second"));
    }

    #[test]
    fn duplicate_keys_kept_in_order() {
        let merged = merge("", "k=1\nk=2");
        assert_eq!(merged, "\n\n#*****\nk=1\nk=2\n");
    }

    #[test]
    fn rejects_empty_divider() {
        let err = merge_config("a", "k=v", "", SEPARATORS).unwrap_err();
        assert_eq!(err, MergeError::InvalidBlockDivider);
    }

    #[test]
    fn rejects_empty_separators() {
        let none: &[&str] = &[];
        let err = merge_config("a", "k=v", DIVIDER, none).unwrap_err();
        assert_eq!(err, MergeError::InvalidSeparators);

        let owned: Vec<String> = Vec::new();
        assert!(merge_config("a", "", DIVIDER, &owned).is_err());
    }

    #[test]
    fn validation_runs_before_short_circuit() {
        // No entries would be produced, but the bad divider still fails.
        assert!(merge_config("a", "", "", SEPARATORS).is_err());
    }

    #[test]
    fn split_without_divider() {
        assert_eq!(split_generated("a=1\nb=2", DIVIDER), ("a=1\nb=2", None));
    }

    #[test]
    fn split_with_divider() {
        let (prefix, block) = split_generated("a=1\n\n#*****\nk=v\n", DIVIDER);
        assert_eq!(prefix, "a=1\n\n");
        assert_eq!(block, Some("k=v\n"));
    }

    #[test]
    fn split_uses_first_divider() {
        let (prefix, block) = split_generated("a\n#*****\nb\n#*****\nc", DIVIDER);
        assert_eq!(prefix, "a\n");
        assert_eq!(block, Some("b\n#*****\nc"));
    }

    #[test]
    fn generated_entries_of_merged_output() {
        let merged = merge("a=1", "x = 1\ny 2");
        let entries = generated_entries(&merged, DIVIDER, SEPARATORS).unwrap();
        assert_eq!(
            entries,
            vec![ConfigEntry::new("x", "=", "1"), ConfigEntry::new("y", " ", "2")]
        );
        assert!(generated_entries("a=1", DIVIDER, SEPARATORS).unwrap().is_empty());
    }

    #[test]
    fn merger_applies_its_convention() {
        let merger = ConfigMerger::new("# generated", [" "]);
        assert!(merger.validate().is_ok());
        let merged = merger.merge("port 5432", "work_mem   8MB").unwrap();
        assert_eq!(merged, "port 5432\n\n# generated\nwork_mem 8MB\n");

        let request = merger.request("port 5432", "work_mem 8MB");
        assert_eq!(request.merge().unwrap(), merged);
    }

    #[test]
    fn merger_with_no_separators_fails() {
        let merger = ConfigMerger::new("#", Vec::<String>::new());
        assert_eq!(merger.validate(), Err(MergeError::InvalidSeparators));
        assert_eq!(merger.merge("", "k=v"), Err(MergeError::InvalidSeparators));
    }

    fn divider() -> impl Strategy<Value = String> {
        "#[*_-]{1,6}"
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(
            current in "[a-z =#*_\n-]{0,60}",
            requested in "[a-z =#\n]{0,60}",
            divider in divider(),
        ) {
            let once = merge_config(&current, &requested, &divider, SEPARATORS).unwrap();
            let twice = merge_config(&once, &requested, &divider, SEPARATORS).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prefix_is_preserved(
            prefix in "[a-z =\n]{0,40}",
            stale in "[a-z =\n]{0,20}",
            key in "[a-z]{1,8}",
            value in "[a-z0-9]{0,8}",
            divider in divider(),
        ) {
            let current = format!("{prefix}{divider}\n{stale}");
            let requested = format!("{key}={value}");
            let merged = merge_config(&current, &requested, &divider, SEPARATORS).unwrap();
            let kept = prefix.trim_end_matches('\n');
            let head = format!("{kept}\n\n{divider}\n");
            let tail = format!("{key}={value}\n");
            prop_assert!(merged.starts_with(&head), "missing head {:?} in {:?}", head, merged);
            prop_assert!(merged.ends_with(&tail), "missing tail {:?} in {:?}", tail, merged);
        }

        #[test]
        fn comment_only_request_is_noop(
            current in "[a-z =#*\n]{0,60}",
            comments in prop::collection::vec("#[a-z =]{0,12}", 0..5),
        ) {
            let requested = comments.join("\n");
            let merged = merge_config(&current, &requested, DIVIDER, SEPARATORS).unwrap();
            prop_assert_eq!(merged, current);
        }
    }
}
