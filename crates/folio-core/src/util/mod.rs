//! Utility modules for file discovery and path handling.
//!
//! # Modules
//!
//! - [`files`]: Markdown discovery and reading
//! - [`paths`]: Output path mapping, tilde expansion, directory creation

pub mod files;
pub mod paths;
