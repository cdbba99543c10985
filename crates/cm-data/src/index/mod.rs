//! Year-bucket indexing over parsed records
//!
//! Each dataset gets an immutable `DatasetIndex` snapshot; rebuilding swaps
//! the whole snapshot so a render in progress always observes a
//! self-consistent index. Records whose year category failed to parse are
//! retained for listings but appear in no bucket.

use ahash::AHashMap;
use cm_core::records::{BreadRecord, HistoryRecord, TemporalRecord, YearCategory};
use parking_lot::RwLock;
use std::sync::Arc;

/// Immutable year-bucket index for one dataset
pub struct DatasetIndex<R> {
    records: Vec<Arc<R>>,
    buckets: AHashMap<YearCategory, Vec<usize>>,
}

impl<R: TemporalRecord> DatasetIndex<R> {
    /// An index with no records, used until the dataset's load completes
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            buckets: AHashMap::new(),
        }
    }

    /// Build an index from parsed records, preserving insertion order
    /// within every bucket
    pub fn build(records: Vec<R>) -> Self {
        let records: Vec<Arc<R>> = records.into_iter().map(Arc::new).collect();
        let mut buckets: AHashMap<YearCategory, Vec<usize>> = AHashMap::new();

        for (idx, record) in records.iter().enumerate() {
            if let Some(year) = record.year_category() {
                buckets.entry(year).or_insert_with(Vec::new).push(idx);
            }
        }

        Self { records, buckets }
    }

    /// Records in `year`, in insertion order.
    ///
    /// An absent bucket yields an empty vector, never an error.
    pub fn records_for(&self, year: YearCategory) -> Vec<Arc<R>> {
        self.buckets
            .get(&year)
            .map(|indices| indices.iter().map(|&idx| self.records[idx].clone()).collect())
            .unwrap_or_default()
    }

    /// Every record of the dataset, including unmapped and unmappable ones
    pub fn all_records(&self) -> &[Arc<R>] {
        &self.records
    }

    /// Year buckets that contain at least one record
    pub fn populated_years(&self) -> Vec<YearCategory> {
        let mut years: Vec<YearCategory> = self.buckets.keys().copied().collect();
        years.sort_unstable();
        years
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Swappable handle to one dataset's current index snapshot
struct IndexHandle<R> {
    snapshot: RwLock<Arc<DatasetIndex<R>>>,
}

impl<R: TemporalRecord> IndexHandle<R> {
    fn empty() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(DatasetIndex::empty())),
        }
    }

    fn snapshot(&self) -> Arc<DatasetIndex<R>> {
        self.snapshot.read().clone()
    }

    fn replace(&self, index: DatasetIndex<R>) {
        *self.snapshot.write() = Arc::new(index);
    }
}

/// The temporal index over both datasets.
///
/// The datasets stay separate collections; the year category is the sole
/// grouping key across them. Before a dataset's load completes its index
/// is empty rather than absent, so readers never need a null check.
pub struct TemporalIndex {
    bread: IndexHandle<BreadRecord>,
    history: IndexHandle<HistoryRecord>,
}

impl TemporalIndex {
    /// Create an index with both datasets empty
    pub fn new() -> Self {
        Self {
            bread: IndexHandle::empty(),
            history: IndexHandle::empty(),
        }
    }

    /// Current bread index snapshot
    pub fn bread(&self) -> Arc<DatasetIndex<BreadRecord>> {
        self.bread.snapshot()
    }

    /// Current history index snapshot
    pub fn history(&self) -> Arc<DatasetIndex<HistoryRecord>> {
        self.history.snapshot()
    }

    /// Atomically swap in a rebuilt bread index
    pub fn replace_bread(&self, index: DatasetIndex<BreadRecord>) {
        self.bread.replace(index);
    }

    /// Atomically swap in a rebuilt history index
    pub fn replace_history(&self, index: DatasetIndex<HistoryRecord>) {
        self.history.replace(index);
    }
}

impl Default for TemporalIndex {
    fn default() -> Self {
        Self::new()
    }
}
