//! Error types for htmlpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for htmlpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HTML to PDF conversion.
///
/// Problems with individual stylesheets are not errors; they are reported
/// through a [`WarningSink`](crate::warning::WarningSink) and skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// The input HTML file could not be opened or decoded.
    #[error("Could not read {}: {source}", .path.display())]
    FileRead {
        /// Path of the input document
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A path could not be turned into a `file://` URL or has no parent.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The document tree could not be serialized back to markup.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The rendering engine failed to produce a PDF.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a rendering error from any displayable engine error.
    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        Error::Render(err.to_string())
    }
}
