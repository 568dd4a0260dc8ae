//! Entry-level diff: compare the generated blocks of two config texts.
//!
//! Each side is reduced to its effective settings first. When a key occurs
//! more than once, the last occurrence wins, which is how the consuming
//! databases read their config files. Changes are reported in key order.

use std::collections::{BTreeMap, BTreeSet};

use confgen_merge::ConfigEntry;
use serde::Serialize;

/// The result of comparing two lists of generated entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EntryDiff {
    /// The list of entry changes.
    pub changes: Vec<EntryChange>,
}

impl EntryDiff {
    /// Create an empty entry diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of added keys.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Added { .. }))
            .count()
    }

    /// Number of removed keys.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Removed { .. }))
            .count()
    }

    /// Number of modified keys.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Modified { .. }))
            .count()
    }
}

/// A single change to a generated setting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum EntryChange {
    /// A key that only the new block sets.
    Added { entry: ConfigEntry },
    /// A key that only the old block set.
    Removed { entry: ConfigEntry },
    /// A key whose rendered line differs (value or separator).
    Modified { old: ConfigEntry, new: ConfigEntry },
}

impl EntryChange {
    /// The key this change is about.
    pub fn key(&self) -> &str {
        match self {
            EntryChange::Added { entry } | EntryChange::Removed { entry } => &entry.key,
            EntryChange::Modified { new, .. } => &new.key,
        }
    }
}

fn effective(entries: &[ConfigEntry]) -> BTreeMap<&str, &ConfigEntry> {
    entries.iter().map(|e| (e.key.as_str(), e)).collect()
}

/// Compute the diff between two generated blocks.
pub fn diff_entries(old: &[ConfigEntry], new: &[ConfigEntry]) -> EntryDiff {
    let old = effective(old);
    let new = effective(new);
    let keys: BTreeSet<&str> = old.keys().chain(new.keys()).copied().collect();

    let changes = keys
        .into_iter()
        .filter_map(|key| match (old.get(key), new.get(key)) {
            (Some(o), Some(n)) if o.separator != n.separator || o.value != n.value => {
                Some(EntryChange::Modified {
                    old: (*o).clone(),
                    new: (*n).clone(),
                })
            }
            (Some(o), None) => Some(EntryChange::Removed { entry: (*o).clone() }),
            (None, Some(n)) => Some(EntryChange::Added { entry: (*n).clone() }),
            _ => None,
        })
        .collect();

    EntryDiff { changes }
}
