use confgen_merge::{ConfigMerger, MergeResult};
use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// Divider used by every built-in dialect.
pub const DEFAULT_BLOCK_DIVIDER: &str = "#________________________________";

/// Name of the dialect used when none is requested.
pub const DEFAULT_DIALECT: &str = "properties";

/// The divider and separator conventions of one config file format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Registry name. Filled from the table key when loaded from TOML.
    #[serde(default, skip_serializing)]
    pub name: String,
    /// Marker that starts the generated block.
    #[serde(default = "default_block_divider")]
    pub block_divider: String,
    /// Key/value separators in priority order.
    pub separators: Vec<String>,
    /// Free-form description shown by `confgen dialects`.
    #[serde(default)]
    pub description: String,
}

fn default_block_divider() -> String {
    DEFAULT_BLOCK_DIVIDER.to_string()
}

impl Dialect {
    /// Create a dialect with an empty description.
    pub fn new<I, S>(name: impl Into<String>, block_divider: impl Into<String>, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            block_divider: block_divider.into(),
            separators: separators.into_iter().map(Into::into).collect(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reject dialects that every merge would fail on.
    pub fn validate(&self) -> Result<()> {
        self.merger()
            .validate()
            .map_err(|e| DialectError::InvalidDialect {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }

    /// A merger using this dialect's conventions.
    pub fn merger(&self) -> ConfigMerger {
        ConfigMerger::new(self.block_divider.clone(), self.separators.clone())
    }

    /// Merge `requested` into `current` using this dialect.
    pub fn merge(&self, current: &str, requested: &str) -> MergeResult<String> {
        self.merger().merge(current, requested)
    }
}

/// The dialects available without any dialect file.
///
/// - `properties`: `key=value` files such as Java properties
/// - `postgres`: `postgresql.conf`, which accepts both `key = value` and `key value`
/// - `space`: whitespace-delimited files such as `redis.conf` or `mongod` flags
/// - `colon`: `key: value` files, falling back to `=`
pub fn builtin_dialects() -> Vec<Dialect> {
    vec![
        Dialect::new("properties", DEFAULT_BLOCK_DIVIDER, ["="])
            .with_description("key=value properties files"),
        Dialect::new("postgres", DEFAULT_BLOCK_DIVIDER, ["=", " "])
            .with_description("postgresql.conf style, '=' preferred over space"),
        Dialect::new("space", DEFAULT_BLOCK_DIVIDER, [" ", "\t"])
            .with_description("whitespace-delimited key value files"),
        Dialect::new("colon", DEFAULT_BLOCK_DIVIDER, [":", "="])
            .with_description("key: value files"),
    ]
}
