//! Error types for anomaly-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in anomaly-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Malformed or incomplete dataset row.
    #[error("malformed dataset (line {line}): {reason}")]
    DataFormat {
        /// 1-based line number in the dataset file (0 when not row-specific).
        line: usize,
        /// What went wrong with the row.
        reason: String,
    },

    /// Invalid dimensions for framebuffer or canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g. degenerate domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering configuration error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
