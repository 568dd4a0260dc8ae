//! Config merge engine.
//!
//! Merges an operator-maintained configuration file with a user-supplied
//! override block. Everything before the block divider is kept; everything
//! after it is regenerated from the override on every call. The engine is a
//! pure text transformation and knows nothing about the database that reads
//! the result.
//!
//! # Key Types
//!
//! - [`MergeRequest`] -- the four inputs of one merge
//! - [`ConfigMerger`] -- a reusable divider/separator convention
//! - [`ConfigEntry`] -- one parsed `key <separator> value` override line
//! - [`MergeError`] -- invalid divider or separators
//!
//! # Quick Start
//!
//! ```rust
//! use confgen_merge::ConfigMerger;
//!
//! let merger = ConfigMerger::new("#*****", ["=", " "]);
//! let merged = merger.merge("max_connections=300", "max_connections = 150").unwrap();
//! assert_eq!(merged, "max_connections=300\n\n#*****\nmax_connections=150\n");
//! ```

pub mod entry;
pub mod error;
pub mod merger;
pub mod request;

pub use entry::{is_ignorable, parse_entries, parse_line, ConfigEntry};
pub use error::{MergeError, MergeResult};
pub use merger::{generated_entries, merge_config, split_generated, validate, ConfigMerger};
pub use request::MergeRequest;
