//! Change reporting for confgen merges.
//!
//! Describes what a merge does to a config file, both as a line diff and as
//! a diff of the generated settings, so callers can tell whether the stored
//! config needs rewriting.
//!
//! # Key Types
//!
//! - [`ConfigDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level text diff
//! - [`EntryDiff`] / [`EntryChange`] -- Generated-entry diff
//! - [`MergePlan`] -- A merge result with both diffs

pub mod entry_diff;
pub mod plan;
pub mod text_diff;

pub use entry_diff::{diff_entries, EntryChange, EntryDiff};
pub use plan::{plan_merge, MergePlan};
pub use text_diff::{diff_text, ConfigDiff, DiffHunk, DiffLine};
