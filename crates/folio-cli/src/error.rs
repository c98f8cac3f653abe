//! Error types for folio-cli

use thiserror::Error;

/// Result type alias for folio-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from folio-core (configuration, discovery, I/O)
    #[error(transparent)]
    Core(#[from] folio_core::Error),

    /// Error from folio-pdf (fonts, rendering)
    #[error(transparent)]
    Pdf(#[from] folio_pdf::Error),

    /// One or more documents failed to convert
    #[error("{failed} of {total} file(s) failed to convert")]
    ConversionFailed {
        /// Number of failed documents
        failed: usize,
        /// Number of documents attempted
        total: usize,
    },
}
