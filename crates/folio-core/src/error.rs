//! Error types for the Folio catalog
//!
//! Normalization and lookup are total and never fail. Errors only come
//! from the edges: reading the data file, parsing JSON, loading
//! configuration, and misusing the scroll controller.

use thiserror::Error;

/// Folio error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The data file could not be read
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    /// The data file is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scroll target names an anchor nobody registered
    #[error("Unknown scroll anchor: #{0}")]
    UnknownAnchor(String),

    /// Scroll request on a controller that was already torn down
    #[error("Scroll controller has been destroyed")]
    ControllerDestroyed,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, Error>;
