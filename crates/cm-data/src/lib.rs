//! Dataset ingestion and indexing for the historical map browser

pub mod config;
pub mod index;
pub mod loader;
pub mod parser;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{DatasetConfig, DatasetsConfig};
pub use index::{DatasetIndex, TemporalIndex};
pub use loader::{DatasetLoader, LoadOutcome};
pub use sources::CsvRowSource;

/// Errors that can occur in data operations
///
/// Field-level problems (bad numbers, bad year buckets) are not errors:
/// the parser degrades them to sentinel values so one malformed row never
/// aborts ingestion of the rest.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
