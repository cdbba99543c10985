//! Flat record listings
//!
//! Unlike the marker projection, listings include every record — ones with
//! unmappable coordinates and ones outside any year bucket stay addressable
//! here.

use cm_core::records::{Coordinates, DatasetKind, YearCategory};
use cm_data::index::TemporalIndex;

use crate::projector::MarkerRecord;

/// One row of the full listing
#[derive(Debug, Clone)]
pub struct ListEntry {
    pub source: DatasetKind,
    pub label: String,
    pub year_category: Option<YearCategory>,
    pub record: MarkerRecord,
}

impl ListEntry {
    /// Fly-to target for a list activation; `None` when the record's
    /// coordinates are non-finite and the map must stay put.
    pub fn fly_target(&self) -> Option<Coordinates> {
        let coordinates = match &self.record {
            MarkerRecord::Bread(record) => record.coordinates,
            MarkerRecord::History(record) => record.coordinates,
        };
        coordinates.is_mappable().then_some(coordinates)
    }
}

/// Every record of both datasets, bread first, in dataset insertion order
pub fn full_listing(index: &TemporalIndex) -> Vec<ListEntry> {
    let bread = index.bread();
    let history = index.history();

    let mut entries = Vec::with_capacity(bread.len() + history.len());

    for record in bread.all_records() {
        entries.push(ListEntry {
            source: DatasetKind::Bread,
            label: record.name.clone(),
            year_category: record.year_category,
            record: MarkerRecord::Bread(record.clone()),
        });
    }

    for record in history.all_records() {
        entries.push(ListEntry {
            source: DatasetKind::History,
            label: record.title.clone(),
            year_category: record.year_category,
            record: MarkerRecord::History(record.clone()),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::records::BreadRecord;
    use cm_data::index::DatasetIndex;

    fn bread(name: &str, lat: f64) -> BreadRecord {
        BreadRecord {
            name: name.to_string(),
            origin_place: String::new(),
            origin_year: String::new(),
            description: String::new(),
            image_name: String::new(),
            coordinates: Coordinates::new(lat, 29.9),
            year_category: Some(-3300),
        }
    }

    #[test]
    fn test_listing_includes_unmappable_records() {
        let index = TemporalIndex::new();
        index.replace_bread(DatasetIndex::build(vec![
            bread("Good", 31.2),
            bread("NaN bread", f64::NAN),
        ]));

        let entries = full_listing(&index);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].label, "NaN bread");
        assert!(entries[1].fly_target().is_none());
        assert!(entries[0].fly_target().is_some());
    }
}
