//! # folio-cli
//!
//! The `folio` command: converts every Markdown file in an input directory
//! (default `docs/`) into a PDF in an output directory (default
//! `dist/pdf/`).
//!
//! - [`cli`]: Argument definitions
//! - [`config`]: TOML configuration and its resolution
//! - [`config_handlers`]: `folio config path|get|set|init`
//! - [`run`]: Batch conversion with per-file error reporting
//! - [`commands`]: Dispatch from parsed arguments

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod run;

pub use cli::{Cli, Command, ConfigAction, ConvertArgs};
pub use config::{ConfigManager, FolioConfig};
pub use error::{Error, Result};
pub use run::{ConversionRun, RunOptions, RunSummary};
