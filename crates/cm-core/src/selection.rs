//! Shared selection state driving the detail view

use crate::records::{BreadRecord, Coordinates, DatasetKind, HistoryRecord};
use parking_lot::RwLock;
use std::sync::Arc;

/// The record currently open in the detail view, if any.
///
/// Collaborators discriminate bread vs history rendering by this tag, never
/// by probing for dataset-specific fields.
#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    None,
    Bread(Arc<BreadRecord>),
    History(Arc<HistoryRecord>),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Which dataset the selected record came from
    pub fn dataset(&self) -> Option<DatasetKind> {
        match self {
            Selection::None => None,
            Selection::Bread(_) => Some(DatasetKind::Bread),
            Selection::History(_) => Some(DatasetKind::History),
        }
    }

    /// Fly-to target for the selected record.
    ///
    /// `None` when nothing is selected or the record's coordinates are not
    /// finite; flying to `NaN` is never attempted.
    pub fn fly_target(&self) -> Option<Coordinates> {
        let coordinates = match self {
            Selection::None => return None,
            Selection::Bread(record) => record.coordinates,
            Selection::History(record) => record.coordinates,
        };
        coordinates.is_mappable().then_some(coordinates)
    }
}

/// Holds at most one inspected record at a time.
///
/// Selecting while a selection is active silently replaces it; there is no
/// queueing or history.
pub struct SelectionState {
    current: Arc<RwLock<Selection>>,
}

impl SelectionState {
    /// Create an empty selection state
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Selection::None)),
        }
    }

    /// Get the current selection
    pub fn current(&self) -> Selection {
        self.current.read().clone()
    }

    /// Replace the current selection
    pub fn select(&self, selection: Selection) {
        *self.current.write() = selection;
    }

    pub fn select_bread(&self, record: Arc<BreadRecord>) {
        self.select(Selection::Bread(record));
    }

    pub fn select_history(&self, record: Arc<HistoryRecord>) {
        self.select(Selection::History(record));
    }

    /// Clear the selection on detail-view dismissal
    pub fn clear(&self) {
        *self.current.write() = Selection::None;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
