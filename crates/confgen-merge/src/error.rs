//! Error types for the merge engine.

use thiserror::Error;

/// Errors returned by a merge. Both are caller configuration bugs; per-line
/// problems in the requested config are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The block divider is empty.
    #[error("invalid block divider: divider must not be empty")]
    InvalidBlockDivider,

    /// No key/value separators were supplied.
    #[error("invalid separators: at least one separator is required")]
    InvalidSeparators,
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
