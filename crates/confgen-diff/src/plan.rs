//! Merge planning: run a merge and describe what it would change.

use confgen_merge::{ConfigMerger, MergeResult};
use serde::Serialize;

use crate::entry_diff::{diff_entries, EntryDiff};
use crate::text_diff::{diff_text, ConfigDiff};

/// A merge result together with its effect on the current config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    /// The merged config text.
    pub merged: String,
    /// Whether `merged` differs from the current config.
    pub changed: bool,
    /// Line diff from the current config to `merged`.
    pub text: ConfigDiff,
    /// Generated-block settings diff from the current config to `merged`.
    pub entries: EntryDiff,
}

/// Merge `requested` into `current` and report the changes.
///
/// Reconcilers can skip rewriting the stored config when `changed` is
/// `false`.
pub fn plan_merge(merger: &ConfigMerger, current: &str, requested: &str) -> MergeResult<MergePlan> {
    let merged = merger.merge(current, requested)?;
    let before = merger.generated_entries(current)?;
    let after = merger.generated_entries(&merged)?;

    Ok(MergePlan {
        changed: merged != current,
        text: diff_text(current, &merged),
        entries: diff_entries(&before, &after),
        merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use confgen_merge::MergeError;

    fn merger() -> ConfigMerger {
        ConfigMerger::new("#*****", ["=", " "])
    }

    #[test]
    fn first_merge_adds_entries() {
        let plan = plan_merge(&merger(), "max_connections=300\n", "max_connections = 150").unwrap();
        assert!(plan.changed);
        assert_eq!(plan.entries.additions(), 1);
        assert_eq!(plan.text.additions(), 3);
        assert_eq!(plan.merged, "max_connections=300\n\n#*****\nmax_connections=150\n");
    }

    #[test]
    fn remerge_is_unchanged() {
        let first = plan_merge(&merger(), "a=1", "k=v").unwrap();
        let second = plan_merge(&merger(), &first.merged, "k=v").unwrap();
        assert!(!second.changed);
        assert!(second.text.is_empty());
        assert!(second.entries.is_empty());
    }

    #[test]
    fn override_update_reports_modification_and_removal() {
        let current = "a=1\n\n#*****\nk=1\nstale=x\n";
        let plan = plan_merge(&merger(), current, "k=2").unwrap();
        assert!(plan.changed);
        assert_eq!(plan.entries.modifications(), 1);
        assert_eq!(plan.entries.removals(), 1);
    }

    #[test]
    fn empty_request_is_noop() {
        let plan = plan_merge(&merger(), "a=1", "# nothing").unwrap();
        assert!(!plan.changed);
        assert_eq!(plan.merged, "a=1");
    }

    #[test]
    fn invalid_convention_fails() {
        let bad = ConfigMerger::new("", ["="]);
        assert_eq!(
            plan_merge(&bad, "a=1", "k=v").unwrap_err(),
            MergeError::InvalidBlockDivider
        );
    }

    #[test]
    fn plan_serializes() {
        let plan = plan_merge(&merger(), "", "k=v").unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["changed"], true);
        assert_eq!(json["entries"]["changes"][0]["change"], "added");
        assert_eq!(json["text"]["hunks"][0]["lines"][0]["kind"], "added");
    }
}
