use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading a shipwreck table.
///
/// Nothing downstream runs until the user has seen one of these.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid JSON that isn't a records-oriented table.
    #[error("invalid JSON layout: {0}")]
    JsonLayout(String),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result alias for the loaders.
pub type Result<T> = std::result::Result<T, DataLoadError>;
