//! Markdown file discovery and reading.
//!
//! Discovery is glob based: `<dir>/*.md` by default, `<dir>/**/*.md` when
//! recursive. Results are sorted so that repeated runs visit files in the
//! same order.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// UTF-8 byte order mark.
const BOM: char = '\u{feff}';

/// Options controlling Markdown discovery.
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File extension to match, without the leading dot.
    pub extension: String,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            extension: "md".to_string(),
        }
    }
}

impl FindOptions {
    /// Enable or disable recursive discovery.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    fn pattern(&self, dir: &Path) -> String {
        let base = glob::Pattern::escape(&dir.to_string_lossy());
        let depth = if self.recursive { "**/" } else { "" };
        format!("{base}/{depth}*.{}", self.extension)
    }
}

/// Find Markdown files under `dir`.
///
/// Returns an error when `dir` does not exist or is not a directory. An
/// existing directory with no matching files yields an empty list.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use folio_core::util::files::{find_markdown_files, FindOptions};
///
/// let files = find_markdown_files(Path::new("docs"), &FindOptions::default()).unwrap();
/// for f in files {
///     println!("{}", f.display());
/// }
/// ```
pub fn find_markdown_files(dir: &Path, options: &FindOptions) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::not_found("input directory", dir));
    }
    if !dir.is_dir() {
        return Err(Error::not_a_directory("input path", dir));
    }

    let pattern = options.pattern(dir);
    log::debug!("Discovering Markdown files with pattern {pattern}");

    let entries = glob::glob(&pattern)
        .map_err(|e| Error::config(format!("invalid discovery pattern {pattern}: {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(Error::io_with_path(e.into(), path));
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Read a Markdown file as UTF-8, dropping a leading byte order mark.
pub fn read_markdown(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut text = String::from_utf8(bytes).map_err(|e| Error::Encoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })?;
    if text.starts_with(BOM) {
        text.drain(..BOM.len_utf8());
    }
    Ok(text)
}
