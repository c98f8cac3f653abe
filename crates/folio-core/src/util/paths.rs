//! Path utilities: output naming, tilde expansion, directory creation.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Map an input document to its output path.
///
/// The output keeps the input's stem and its location relative to
/// `input_root`, with the extension replaced by `extension`:
///
/// ```
/// use std::path::Path;
/// use folio_core::util::paths::output_path_for;
///
/// let out = output_path_for(
///     Path::new("docs/guide/intro.md"),
///     Path::new("docs"),
///     Path::new("dist/pdf"),
///     "pdf",
/// )
/// .unwrap();
/// assert_eq!(out, Path::new("dist/pdf/guide/intro.pdf"));
/// ```
pub fn output_path_for(
    input: &Path,
    input_root: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| Error::parse(format!("{} has no file name", input.display())))?;

    let relative_dir = input
        .parent()
        .and_then(|parent| parent.strip_prefix(input_root).ok())
        .unwrap_or_else(|| Path::new(""));

    // `set_extension` would truncate a dotted stem such as `v1.2.notes`.
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    Ok(output_dir.join(relative_dir).join(name))
}

/// Create `dir` and its parents if missing.
///
/// Fails if the path exists but is not a directory, or if it cannot be
/// created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::not_a_directory("output path", dir));
    }
    std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))
}
