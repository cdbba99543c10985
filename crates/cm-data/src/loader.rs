//! Dataset load lifecycle
//!
//! Loading is the one asynchronous boundary of the engine. Each dataset
//! resolves to a one-shot completion: rows arrive and the dataset's index
//! snapshot is rebuilt and swapped in, or the load fails and the index
//! stays empty until someone asks for a reload. Re-invoking a load while a
//! prior one is outstanding supersedes it; the stale completion is
//! discarded rather than applied out of order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cm_core::events::events::{DatasetLoaded, DatasetLoadFailed};
use cm_core::events::EventBus;
use cm_core::records::DatasetKind;
use cm_core::rows::RowSource;
use tracing::{info, warn};

use crate::index::{DatasetIndex, TemporalIndex};
use crate::parser;

/// One-shot outcome of a dataset load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows arrived and the index snapshot was swapped in
    Loaded { records: usize },
    /// The transport failed; the dataset's index stays empty
    Failed { reason: String },
    /// A newer load request won; this completion was discarded
    Superseded,
}

/// Coordinates dataset loads against the shared temporal index
pub struct DatasetLoader {
    index: Arc<TemporalIndex>,
    events: Arc<EventBus>,
    bread_generation: AtomicU64,
    history_generation: AtomicU64,
}

impl DatasetLoader {
    pub fn new(index: Arc<TemporalIndex>, events: Arc<EventBus>) -> Self {
        Self {
            index,
            events,
            bread_generation: AtomicU64::new(0),
            history_generation: AtomicU64::new(0),
        }
    }

    fn generation_counter(&self, dataset: DatasetKind) -> &AtomicU64 {
        match dataset {
            DatasetKind::Bread => &self.bread_generation,
            DatasetKind::History => &self.history_generation,
        }
    }

    /// Load the bread dataset from `source`
    pub async fn load_bread(&self, source: &dyn RowSource) -> LoadOutcome {
        self.load(source, DatasetKind::Bread, |index, rows| {
            let records = parser::parse_bread_rows(rows);
            let count = records.len();
            index.replace_bread(DatasetIndex::build(records));
            count
        })
        .await
    }

    /// Load the history dataset from `source`
    pub async fn load_history(&self, source: &dyn RowSource) -> LoadOutcome {
        self.load(source, DatasetKind::History, |index, rows| {
            let records = parser::parse_history_rows(rows);
            let count = records.len();
            index.replace_history(DatasetIndex::build(records));
            count
        })
        .await
    }

    async fn load(
        &self,
        source: &dyn RowSource,
        dataset: DatasetKind,
        apply: impl FnOnce(&TemporalIndex, &[cm_core::rows::RawRow]) -> usize,
    ) -> LoadOutcome {
        let counter = self.generation_counter(dataset);
        let generation = counter.fetch_add(1, Ordering::SeqCst) + 1;
        let source_name = source.source_name().to_string();

        let result = source.fetch_rows().await;

        // Last write wins: a reload issued while we were fetching owns the
        // index now, so this completion must not touch it.
        if counter.load(Ordering::SeqCst) != generation {
            warn!(dataset = dataset.as_str(), source = %source_name, "discarding stale load completion");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(rows) => {
                let records = apply(self.index.as_ref(), rows.as_slice());
                info!(
                    dataset = dataset.as_str(),
                    source = %source_name,
                    records,
                    "dataset loaded"
                );
                self.events.publish(DatasetLoaded {
                    dataset,
                    source_name,
                    record_count: records,
                });
                LoadOutcome::Loaded { records }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(dataset = dataset.as_str(), source = %source_name, %reason, "dataset load failed");
                self.events.publish(DatasetLoadFailed {
                    dataset,
                    source_name,
                    error: reason.clone(),
                });
                LoadOutcome::Failed { reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cm_core::rows::RawRow;
    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    struct StaticSource {
        name: String,
        rows: Vec<RawRow>,
    }

    impl StaticSource {
        fn bread(names: &[&str]) -> Self {
            let rows = names
                .iter()
                .map(|name| {
                    let mut row = RawRow::default();
                    row.insert("name".to_string(), name.to_string());
                    row.insert("latitude".to_string(), "31.2".to_string());
                    row.insert("longitude".to_string(), "29.9".to_string());
                    row.insert("year_category".to_string(), "-3300".to_string());
                    row
                })
                .collect();
            Self {
                name: "static.csv".to_string(),
                rows,
            }
        }
    }

    #[async_trait]
    impl RowSource for StaticSource {
        async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>> {
            Ok(self.rows.clone())
        }

        fn dataset(&self) -> DatasetKind {
            DatasetKind::Bread
        }

        fn source_name(&self) -> &str {
            &self.name
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RowSource for FailingSource {
        async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>> {
            anyhow::bail!("connection refused")
        }

        fn dataset(&self) -> DatasetKind {
            DatasetKind::Bread
        }

        fn source_name(&self) -> &str {
            "failing.csv"
        }
    }

    /// Holds its completion until the test releases the gate.
    struct GatedSource {
        inner: StaticSource,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl RowSource for GatedSource {
        async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>> {
            let gate = self.gate.lock().take().expect("gate taken once");
            gate.await.ok();
            self.inner.fetch_rows().await
        }

        fn dataset(&self) -> DatasetKind {
            DatasetKind::Bread
        }

        fn source_name(&self) -> &str {
            "gated.csv"
        }
    }

    #[tokio::test]
    async fn test_successful_load_swaps_index_in() {
        let index = Arc::new(TemporalIndex::new());
        let loader = DatasetLoader::new(index.clone(), Arc::new(EventBus::new()));

        let outcome = loader
            .load_bread(&StaticSource::bread(&["Flatbread", "Pita"]))
            .await;

        assert_eq!(outcome, LoadOutcome::Loaded { records: 2 });
        assert_eq!(index.bread().records_for(-3300).len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_index_empty() {
        let index = Arc::new(TemporalIndex::new());
        let loader = DatasetLoader::new(index.clone(), Arc::new(EventBus::new()));

        let outcome = loader.load_bread(&FailingSource).await;

        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert!(index.bread().is_empty());
        // The other dataset is unaffected and still readable
        assert!(index.history().records_for(-3300).is_empty());
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let index = Arc::new(TemporalIndex::new());
        let loader = Arc::new(DatasetLoader::new(index.clone(), Arc::new(EventBus::new())));

        let (release, gate) = oneshot::channel();
        let slow = Arc::new(GatedSource {
            inner: StaticSource::bread(&["Stale"]),
            gate: Mutex::new(Some(gate)),
        });

        let slow_load = {
            let loader = loader.clone();
            let slow = slow.clone();
            tokio::spawn(async move { loader.load_bread(slow.as_ref()).await })
        };

        // Give the slow load time to claim its generation before reloading
        tokio::task::yield_now().await;
        let fast = loader
            .load_bread(&StaticSource::bread(&["Fresh A", "Fresh B"]))
            .await;
        assert_eq!(fast, LoadOutcome::Loaded { records: 2 });

        release.send(()).expect("release gate");
        let stale = slow_load.await.expect("join");

        assert_eq!(stale, LoadOutcome::Superseded);
        // The fresh load's snapshot survived
        assert_eq!(index.bread().len(), 2);
    }
}
