//! Error types for the prepkit library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for prepkit operations.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A function argument failed validation.
    #[error("[{source_tag}] Invalid argument: '{label}' - Expected {expected}, Received {received}")]
    InvalidArgument {
        source_tag: String,
        label: String,
        expected: String,
        received: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Regex constants were read before the data loader ran.
    #[error("Data not initialized: call DataLoader::initialize() first")]
    NotInitialized,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Base64 content of a `FileData` could not be decoded.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Workbook could not be opened or read.
    #[error("Excel error: {0}")]
    Excel(String),

    /// Logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl PrepError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for prepkit operations.
pub type Result<T> = std::result::Result<T, PrepError>;
