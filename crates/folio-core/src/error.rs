//! Error types for folio-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for folio-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-core and the crates built on it
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure, with the path that was being accessed when known
    #[error("I/O error{}: {source}", display_path(.path))]
    Io {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path involved in the failed operation
        path: Option<PathBuf>,
    },

    /// A required file or directory does not exist
    #[error("{what} not found: {}", .path.display())]
    NotFound {
        /// What was being looked for ("input directory", "font file", ...)
        what: &'static str,
        /// Path that was checked
        path: PathBuf,
    },

    /// A path that must be a directory is something else
    #[error("{what} {} is not a directory", .path.display())]
    NotADirectory {
        /// Role of the path ("input path", "output path")
        what: &'static str,
        /// Offending path
        path: PathBuf,
    },

    /// Input file is not valid UTF-8 text
    #[error("{} is not valid UTF-8: {message}", .path.display())]
    Encoding {
        /// Offending file
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content parse problem
    #[error("Parse error: {0}")]
    Parse(String),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source, path: None }
    }
}

impl Error {
    /// Wrap an I/O error together with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a not-found error.
    pub fn not_found(what: &'static str, path: impl AsRef<Path>) -> Self {
        Error::NotFound {
            what,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a not-a-directory error.
    pub fn not_a_directory(what: &'static str, path: impl AsRef<Path>) -> Self {
        Error::NotADirectory {
            what,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Io { path, .. } => path.as_deref(),
            Error::NotFound { path, .. }
            | Error::NotADirectory { path, .. }
            | Error::Encoding { path, .. } => Some(path),
            _ => None,
        }
    }
}
