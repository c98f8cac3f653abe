//! Error types for folio-pdf

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for folio-pdf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading fonts, laying out, or writing PDFs
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from folio-core (I/O, discovery, parsing)
    #[error(transparent)]
    Core(#[from] folio_core::Error),

    /// No usable font file was found
    #[error("no usable Unicode font found (searched: {})", join_paths(.searched))]
    FontNotFound {
        /// Every path that was checked
        searched: Vec<PathBuf>,
    },

    /// A font file exists but could not be used
    #[error("cannot use font {}: {message}", .path.display())]
    Font {
        /// Font file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The active fonts have no glyph for a character
    #[error("character {ch:?} (U+{:04X}) cannot be rendered with font {font}", codepoint(.ch))]
    UnsupportedGlyph {
        /// The character
        ch: char,
        /// Name of the font that was asked to render it
        font: String,
    },

    /// PDF serialization failure
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Failure while converting a specific file
    #[error("{}: {source}", .path.display())]
    InFile {
        /// The document being converted
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

fn codepoint(ch: &char) -> u32 {
    *ch as u32
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Core(e.into())
    }
}

impl Error {
    /// Create a font error for `path`.
    pub fn font(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::Font {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Attach the document path to this error.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            already @ Error::InFile { .. } => already,
            other => Error::InFile {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping file context.
    pub fn root(&self) -> &Error {
        match self {
            Error::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}
