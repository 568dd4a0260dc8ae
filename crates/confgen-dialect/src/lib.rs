//! Config file dialects for confgen.
//!
//! A dialect names the block divider and key/value separators of one config
//! file format, so reconcilers can refer to `"postgres"` instead of repeating
//! the conventions at every call site.
//!
//! # Modules
//!
//! - [`error`] -- Error types for dialect loading
//! - [`dialect`] -- The [`Dialect`] type and the built-in dialects
//! - [`registry`] -- [`DialectRegistry`], built-ins plus TOML-defined dialects

pub mod dialect;
pub mod error;
pub mod registry;

pub use dialect::{builtin_dialects, Dialect, DEFAULT_BLOCK_DIVIDER, DEFAULT_DIALECT};
pub use error::{DialectError, Result};
pub use registry::DialectRegistry;
