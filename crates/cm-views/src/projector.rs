//! Marker projection from the temporal index
//!
//! Pure derivation: given the index and the active year bucket, produce the
//! ordered marker list for the map surface. Recomputed on every cursor
//! change and never cached — marker sets are small and recomputation is
//! negligible next to render cost.

use cm_core::records::{BreadRecord, Coordinates, DatasetKind, HistoryRecord, YearCategory};
use cm_core::selection::Selection;
use cm_data::index::TemporalIndex;
use serde::Serialize;
use std::sync::Arc;

/// Icon for a marker, derived from record fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IconDescriptor {
    /// Circular photo badge keyed by the record's image file
    Bread { image: String },
    /// Text badge showing the era label and title
    History { era: String, title: String },
}

/// Back-reference from a marker to its full record
#[derive(Debug, Clone)]
pub enum MarkerRecord {
    Bread(Arc<BreadRecord>),
    History(Arc<HistoryRecord>),
}

impl MarkerRecord {
    /// Short text shown in the marker popup
    pub fn popup_label(&self) -> &str {
        match self {
            MarkerRecord::Bread(record) => &record.name,
            MarkerRecord::History(record) => &record.title,
        }
    }

    /// Convert a marker activation into a selection
    pub fn to_selection(&self) -> Selection {
        match self {
            MarkerRecord::Bread(record) => Selection::Bread(record.clone()),
            MarkerRecord::History(record) => Selection::History(record.clone()),
        }
    }
}

/// A single renderable unit on the map surface
#[derive(Debug, Clone)]
pub struct MarkerDescriptor {
    pub source: DatasetKind,
    pub coordinates: Coordinates,
    pub icon: IconDescriptor,
    pub record: MarkerRecord,
}

/// Icon for a bread record
pub fn bread_icon(record: &BreadRecord) -> IconDescriptor {
    IconDescriptor::Bread {
        image: record.image_name.clone(),
    }
}

/// Icon for a history record
pub fn history_icon(record: &HistoryRecord) -> IconDescriptor {
    IconDescriptor::History {
        era: record.era.clone(),
        title: record.title.clone(),
    }
}

/// Markers visible at `year`: mappable bread records first, then mappable
/// history records, each in dataset insertion order.
///
/// No cross-dataset sorting or deduplication happens here — two records at
/// identical coordinates both render, and any visual grouping belongs to
/// the clustering collaborator.
pub fn visible_markers(index: &TemporalIndex, year: YearCategory) -> Vec<MarkerDescriptor> {
    let bread = index.bread();
    let history = index.history();

    let mut markers = Vec::new();

    for record in bread.records_for(year) {
        if !record.coordinates.is_mappable() {
            continue;
        }
        markers.push(MarkerDescriptor {
            source: DatasetKind::Bread,
            coordinates: record.coordinates,
            icon: bread_icon(&record),
            record: MarkerRecord::Bread(record),
        });
    }

    for record in history.records_for(year) {
        if !record.coordinates.is_mappable() {
            continue;
        }
        markers.push(MarkerDescriptor {
            source: DatasetKind::History,
            coordinates: record.coordinates,
            icon: history_icon(&record),
            record: MarkerRecord::History(record),
        });
    }

    markers
}
