//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Folio: convert Markdown documents to PDF
#[derive(Parser, Debug)]
#[command(name = "folio", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Conversion options when no subcommand is given
    #[command(flatten)]
    pub convert: ConvertArgs,

    #[command(subcommand)]
    /// Subcommand (defaults to `convert`)
    pub command: Option<Command>,
}

impl Cli {
    /// Log filter for the verbosity flags, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every Markdown file in the input directory (the default)
    Convert(ConvertArgs),

    /// Inspect or edit the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for a conversion run. Each one overrides the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertArgs {
    /// Directory containing Markdown files [default: docs]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory PDFs are written to [default: dist/pdf]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Font file for body text (TrueType, OpenType, or collection)
    #[arg(long)]
    pub font: Option<String>,

    /// Face index inside a font collection
    #[arg(long)]
    pub font_index: Option<u32>,

    /// Fail instead of falling back to Helvetica when no Unicode font is found
    #[arg(long)]
    pub require_unicode: bool,

    /// Include Markdown files in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Write uncompressed content streams
    #[arg(long)]
    pub no_compress: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Get a value by dotted key (e.g. `font.path`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value (bool, integer, float, or string)
        value: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it [default: platform config dir]
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
