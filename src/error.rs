//! Error types for the deckwright library.

use std::io;
use thiserror::Error;

/// Result type alias for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling a document.
///
/// Every variant is fatal to the build. A missing configuration path is not
/// an error: it resolves to the caller's fallback value.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading decks or configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a deck or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table row does not have one cell per header.
    #[error("Table shape mismatch: row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        /// 0-indexed data row
        row: usize,
        /// Number of headers
        expected: usize,
        /// Number of cells in the offending row
        found: usize,
    },

    /// Explicit column widths do not line up with the table headers.
    #[error("Invalid column widths: {found} widths given for {expected} columns")]
    InvalidColumnWidths {
        /// Number of headers
        expected: usize,
        /// Number of widths supplied
        found: usize,
    },

    /// A column width is not a positive finite length.
    #[error("Invalid column width: column {column} is {width}pt")]
    ColumnWidth {
        /// 0-indexed column
        column: usize,
        /// Offending width in points
        width: f32,
    },

    /// The external diagram renderer failed or produced no output.
    #[error("Diagram renderer failure: {0}")]
    RendererFailure(String),

    /// The final artifact could not be persisted.
    #[error("Sink write failure: {0}")]
    SinkWriteFailure(String),

    /// A page cannot be laid out on the canvas.
    #[error("Layout error: {0}")]
    Layout(String),

    /// The declarative deck is inconsistent.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
