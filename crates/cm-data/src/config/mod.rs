//! Dataset configuration
//!
//! A small serde-backed description of where each dataset's CSV lives and
//! where image references resolve. Loaded from JSON by the application.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::DataError;

fn default_delimiter() -> char {
    ','
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("images")
}

/// Configuration for a single dataset file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the CSV file
    pub path: PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl DatasetConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: default_delimiter(),
        }
    }
}

/// Configuration for both datasets plus the static asset root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    pub bread: DatasetConfig,
    pub history: DatasetConfig,

    /// Root directory that record image references resolve against.
    /// Existence of individual files is the rendering surface's concern.
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
}

impl DatasetsConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|err| DataError::Config(err.to_string()))
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|err| DataError::Config(err.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trips_through_json() {
        let config = DatasetsConfig {
            bread: DatasetConfig::new("data/bread.csv"),
            history: DatasetConfig::new("data/history.csv"),
            asset_root: PathBuf::from("assets/images"),
        };

        let file = tempfile::NamedTempFile::new().expect("temp file");
        config.save(file.path()).expect("save");
        let loaded = DatasetsConfig::load(file.path()).expect("load");

        assert_eq!(loaded.bread.path, PathBuf::from("data/bread.csv"));
        assert_eq!(loaded.asset_root, PathBuf::from("assets/images"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"bread": {{"path": "bread.csv"}}, "history": {{"path": "history.csv"}}}}"#
        )
        .expect("write json");

        let loaded = DatasetsConfig::load(file.path()).expect("load");
        assert_eq!(loaded.bread.delimiter, ',');
        assert_eq!(loaded.asset_root, PathBuf::from("images"));
    }
}
