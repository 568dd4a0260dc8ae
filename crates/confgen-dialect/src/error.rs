//! Error types for dialect loading and lookup.

use thiserror::Error;

/// Errors that can occur while loading or resolving dialects.
#[derive(Debug, Error)]
pub enum DialectError {
    /// No dialect is registered under this name.
    #[error("unknown dialect: {name}")]
    UnknownDialect { name: String },

    /// The dialect's divider or separators cannot be used for merging.
    #[error("invalid dialect {name}: {reason}")]
    InvalidDialect { name: String, reason: String },

    /// The dialect file is not valid TOML or has the wrong shape.
    #[error("dialect file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// I/O error while reading a dialect file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
