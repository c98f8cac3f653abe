//! Top-level command dispatch.

use folio_pdf::{Converter, FontSet};

use crate::cli::{Cli, Command, ConvertArgs};
use crate::config::{ConfigManager, FolioConfig};
use crate::config_handlers::handle_config_command;
use crate::run::{ConversionRun, RunOptions, RunSummary};
use crate::{Error, Result};

/// Run the command selected on the command line.
///
/// A conversion run in which any document failed is an error, so the
/// process exits non-zero.
pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Command::Config { action }) => Ok(handle_config_command(config_path, action)?),
        Some(Command::Convert(args)) => check(cmd_convert(config_path, &args)?),
        None => check(cmd_convert(config_path, &cli.convert)?),
    }
}

fn check(summary: RunSummary) -> Result<()> {
    if summary.is_success() {
        Ok(())
    } else {
        Err(Error::ConversionFailed {
            failed: summary.failed.len(),
            total: summary.attempted(),
        })
    }
}

/// Convert the configured input directory.
pub fn cmd_convert(config_path: Option<&str>, args: &ConvertArgs) -> Result<RunSummary> {
    let mut config = FolioConfig::load(config_path)?;
    config.apply_args(args);
    tracing::debug!(?config, "Resolved configuration");

    let fonts = FontSet::resolve(&config.font)?;
    let converter = Converter::new(fonts)
        .with_setup(config.page_setup())
        .with_compress(config.output.compress);

    let options = RunOptions {
        input_dir: config.input_dir(),
        output_dir: config.output_dir(),
        recursive: config.input.recursive,
        fail_fast: args.fail_fast,
    };
    ConversionRun::new(&converter, options).execute()
}
