//! Folio CLI
//!
//! Batch Markdown to PDF conversion.

use std::io::IsTerminal;

use clap::Parser;
use folio_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    folio_cli::commands::execute(cli)?;
    Ok(())
}
