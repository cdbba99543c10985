//! CSV-backed row source
//!
//! The transport end of ingestion: reads one dataset file and hands the
//! rows to the parser as string-keyed maps. Rows that the csv reader
//! cannot decode are skipped with a warning so one broken line never
//! aborts the rest of the file.

use async_trait::async_trait;
use cm_core::records::DatasetKind;
use cm_core::rows::{RawRow, RowSource};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::DataError;

/// Row source for a single dataset CSV file
pub struct CsvRowSource {
    /// Path to the CSV file
    path: PathBuf,
    dataset: DatasetKind,
    delimiter: u8,
}

impl CsvRowSource {
    /// Create a new CSV source from a file path
    pub fn new(path: impl Into<PathBuf>, dataset: DatasetKind) -> Self {
        Self {
            path: path.into(),
            dataset,
            delimiter: b',',
        }
    }

    /// Override the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<RawRow>, DataError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping undecodable row");
                    continue;
                }
            };

            let mut row = RawRow::default();
            for (idx, name) in headers.iter().enumerate() {
                if let Some(value) = record.get(idx) {
                    row.insert(name.to_string(), value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

#[async_trait]
impl RowSource for CsvRowSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>> {
        let path = self.path.clone();
        let delimiter = self.delimiter;

        let rows = tokio::task::spawn_blocking(move || Self::read_rows(&path, delimiter))
            .await
            .map_err(DataError::from)??;

        tracing::info!(
            path = %self.path.display(),
            rows = rows.len(),
            "csv dataset read"
        );
        Ok(rows)
    }

    fn dataset(&self) -> DatasetKind {
        self.dataset
    }

    fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
