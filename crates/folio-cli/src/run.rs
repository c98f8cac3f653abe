//! Batch conversion of an input directory.

use std::path::{Path, PathBuf};

use folio_core::{FindOptions, ensure_dir, find_markdown_files, output_path_for};
use folio_pdf::{ConversionReport, Converter};

use crate::Result;

/// Where to read from and write to, and how to react to failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory searched for Markdown files.
    pub input_dir: PathBuf,
    /// Directory PDFs are written to.
    pub output_dir: PathBuf,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Stop at the first failure.
    pub fail_fast: bool,
}

/// A document that could not be converted.
#[derive(Debug)]
pub struct FileFailure {
    /// The Markdown file.
    pub input: PathBuf,
    /// Why it failed.
    pub error: folio_pdf::Error,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files that were found.
    pub discovered: usize,
    /// Files converted successfully, in order.
    pub converted: Vec<ConversionReport>,
    /// Files that failed, in order.
    pub failed: Vec<FileFailure>,
}

impl RunSummary {
    /// Whether every attempted file converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files attempted.
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Converts every Markdown file under one directory.
pub struct ConversionRun<'a> {
    converter: &'a Converter,
    options: RunOptions,
}

impl<'a> ConversionRun<'a> {
    /// A run that draws with `converter`.
    pub fn new(converter: &'a Converter, options: RunOptions) -> Self {
        Self { converter, options }
    }

    /// Input/output path pairs, in conversion order.
    pub fn plan(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let find = FindOptions::default().recursive(self.options.recursive);
        let inputs = find_markdown_files(&self.options.input_dir, &find)?;
        let mut plan = Vec::with_capacity(inputs.len());
        for input in inputs {
            let output =
                output_path_for(&input, &self.options.input_dir, &self.options.output_dir, "pdf")?;
            plan.push((input, output));
        }
        Ok(plan)
    }

    /// Convert every planned file.
    ///
    /// Discovery problems (missing input directory) and an output directory
    /// that cannot be created fail the whole run. A document that fails is
    /// recorded and the run moves on, unless `fail_fast` is set.
    pub fn execute(&self) -> Result<RunSummary> {
        let plan = self.plan()?;
        let mut summary = RunSummary {
            discovered: plan.len(),
            ..RunSummary::default()
        };

        if plan.is_empty() {
            println!(
                "No Markdown files found in {}.",
                self.options.input_dir.display()
            );
            return Ok(summary);
        }

        ensure_dir(&self.options.output_dir)?;

        for (input, output) in plan {
            tracing::info!("Converting {} -> {}", input.display(), output.display());
            match self.converter.convert_file(&input, &output) {
                Ok(report) => summary.converted.push(report),
                Err(error) => {
                    tracing::error!("{error}");
                    summary.failed.push(FileFailure { input, error });
                    if self.options.fail_fast {
                        break;
                    }
                }
            }
        }

        report_summary(&summary, &self.options.output_dir);
        Ok(summary)
    }
}

fn report_summary(summary: &RunSummary, output_dir: &Path) {
    if summary.is_success() {
        println!("Done. PDFs at: {}", output_dir.display());
    } else {
        println!(
            "Converted {} of {} file(s); PDFs at: {}",
            summary.converted.len(),
            summary.discovered,
            output_dir.display()
        );
        for failure in &summary.failed {
            eprintln!("  failed: {}", failure.input.display());
        }
    }
}
