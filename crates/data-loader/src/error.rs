//! Error types for the data-loader crate.
//!
//! Only whole-load failures are represented here. A malformed *row* is not
//! an error value: it is skipped, logged at debug level, and observable
//! only as a smaller catalog.

use thiserror::Error;

/// Errors that can occur while loading a film catalog.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw bytes were not decodable as UTF-8 text
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Input had no header row
    #[error("input is empty: no header row")]
    EmptyInput,

    /// A column required by the active schema is absent from the header
    #[error("missing column '{name}' in header")]
    MissingColumn { name: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
