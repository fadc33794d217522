//! Error types for termplot operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering figures.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (terminal writes, file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// Invalid dimensions for a canvas, image or subplot grid.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between paired arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., equal min and max).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Marker name that is neither a known style nor a single character.
    #[error("Unknown marker: {0}")]
    UnknownMarker(String),

    /// Theme name with no preset.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Subplot position outside the figure grid (1-based).
    #[error("Subplot ({row}, {col}) is outside the {rows}x{cols} grid")]
    InvalidSubplot {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// A date string did not match the active date form.
    #[error("Cannot parse date '{input}': {message}")]
    DateParse {
        /// The offending input.
        input: String,
        /// Parser message.
        message: String,
    },

    /// Image layout the image loader cannot convert.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
