//! Named dialect lookup, seeded with the built-ins and extended from TOML.
//!
//! A dialect file is a table of tables:
//!
//! ```toml
//! [dialects.pgbouncer]
//! block_divider = "#----- confgen -----"
//! separators = ["=", " "]
//! description = "pgbouncer.ini overrides"
//! ```
//!
//! `block_divider` defaults to [`DEFAULT_BLOCK_DIVIDER`](crate::DEFAULT_BLOCK_DIVIDER).
//! File dialects replace built-ins of the same name.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dialect::{builtin_dialects, Dialect};
use crate::error::{DialectError, Result};

#[derive(Debug, Default, Deserialize)]
struct DialectFile {
    #[serde(default)]
    dialects: BTreeMap<String, Dialect>,
}

/// Dialects keyed by name, iterated in name order.
#[derive(Clone, Debug, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<String, Dialect>,
}

impl DialectRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in dialects.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for dialect in builtin_dialects() {
            registry.dialects.insert(dialect.name.clone(), dialect);
        }
        registry
    }

    /// Add or replace a dialect after validating it.
    pub fn insert(&mut self, dialect: Dialect) -> Result<()> {
        dialect.validate()?;
        let name = dialect.name.clone();
        if self.dialects.insert(name.clone(), dialect).is_some() {
            debug!(%name, "replaced existing dialect");
        }
        Ok(())
    }

    /// Look up a dialect by name.
    pub fn get(&self, name: &str) -> Result<&Dialect> {
        self.dialects
            .get(name)
            .ok_or_else(|| DialectError::UnknownDialect {
                name: name.to_string(),
            })
    }

    /// Registered names in order.
    pub fn names(&self) -> Vec<&str> {
        self.dialects.keys().map(String::as_str).collect()
    }

    /// All dialects in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Dialect> {
        self.dialects.values()
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }

    /// Merge the dialects defined in a TOML document into this registry.
    ///
    /// Every dialect in the document is validated before any is inserted, so
    /// a bad file leaves the registry untouched.
    pub fn extend_from_toml_str(&mut self, source: &str) -> Result<()> {
        let file: DialectFile = toml::from_str(source)?;
        let mut parsed = Vec::with_capacity(file.dialects.len());
        for (name, mut dialect) in file.dialects {
            dialect.name = name;
            dialect.validate()?;
            parsed.push(dialect);
        }
        debug!(count = parsed.len(), "loaded dialects");
        for dialect in parsed {
            self.dialects.insert(dialect.name.clone(), dialect);
        }
        Ok(())
    }

    /// Built-ins plus the dialects of a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut registry = Self::with_builtins();
        registry.extend_from_toml_str(source)?;
        Ok(registry)
    }

    /// Built-ins plus the dialects of a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading dialect file");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
