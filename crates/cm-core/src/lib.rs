//! Core functionality for the historical map browser
//!
//! This crate provides the event record model and the engine state
//! (year cursor, selection) that the projection layer derives views from.

pub mod events;
pub mod navigation;
pub mod records;
pub mod selection;

// Re-export commonly used types
pub use navigation::{year_label, YearContext, YearCursor, YearSubscriber, INITIAL_YEAR, YEAR_STEP};
pub use records::{BreadRecord, Coordinates, DatasetKind, HistoryRecord, ImageRef, YearCategory};
pub use rows::{RawRow, RowSource};
pub use selection::{Selection, SelectionState};

/// Raw tabular input contract implemented by the transport layer.
pub mod rows {
    use crate::records::DatasetKind;

    /// One CSV line keyed by the header row. Not retained after parsing.
    pub type RawRow = ahash::AHashMap<String, String>;

    /// Trait for dataset row suppliers
    #[async_trait::async_trait]
    pub trait RowSource: Send + Sync {
        /// Fetch every row of the dataset, in file order.
        ///
        /// Resolves exactly once per load request; transport retries, if
        /// any, happen behind this call.
        async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>>;

        /// Which dataset this source feeds
        fn dataset(&self) -> DatasetKind;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
