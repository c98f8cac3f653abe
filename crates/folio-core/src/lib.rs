//! Folio Core: shared error type and file utilities.
//!
//! This crate provides the foundational types used across all Folio crates.
//! It has no internal Folio dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Markdown discovery and path utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::files::{FindOptions, find_markdown_files, read_markdown};
pub use util::paths::{ensure_dir, expand_tilde, output_path_for};
