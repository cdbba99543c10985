//! Typed event records produced by dataset ingestion
//!
//! Records are immutable once parsed and are shared as `Arc`s between the
//! temporal index, the selection state and the projection layer.

use serde::{Deserialize, Serialize};

/// Identifies which dataset a record (or marker) came from.
///
/// The two datasets are never merged into one collection; a bread record
/// and a history record can share a year category and still render as two
/// independent markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Food-origin records
    Bread,
    /// General historical records
    History,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Bread => "bread",
            DatasetKind::History => "history",
        }
    }
}

/// Year bucket key. Negative values are BCE, positive values CE.
///
/// Year 0 is never a valid bucket; cursor arithmetic skips it.
pub type YearCategory = i32;

/// Geographic position parsed from a record row.
///
/// Unparseable latitude/longitude fields degrade to `NaN` rather than
/// failing ingestion, so a position is not necessarily mappable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and the record can be placed on
    /// the map surface. Non-mappable records still exist for list views.
    pub fn is_mappable(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Image reference for history records.
///
/// The raw data uses the literal string `"none"` to mean "no image
/// available"; it is parsed into this enum at ingestion time so that no
/// collaborator ever compares against the sentinel string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRef {
    /// No image; the detail view renders a textual placeholder.
    None,
    /// File name resolved against the static asset root.
    File(String),
}

impl ImageRef {
    /// Parse the raw column value. Empty values count as missing too.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            ImageRef::None
        } else {
            ImageRef::File(trimmed.to_string())
        }
    }

    pub fn file(&self) -> Option<&str> {
        match self {
            ImageRef::None => None,
            ImageRef::File(name) => Some(name),
        }
    }
}

/// A food-origin record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadRecord {
    /// Display name
    pub name: String,
    /// Free-text provenance
    pub origin_place: String,
    pub origin_year: String,
    pub description: String,
    /// File reference resolved against the static asset root; existence is
    /// the rendering collaborator's concern.
    pub image_name: String,
    pub coordinates: Coordinates,
    /// `None` when the raw field did not parse as an integer; such records
    /// surface in no bucketed view.
    pub year_category: Option<YearCategory>,
}

/// A general historical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Free-text year label, distinct from the bucket key
    pub era: String,
    pub title: String,
    pub description: String,
    pub image: ImageRef,
    pub coordinates: Coordinates,
    pub year_category: Option<YearCategory>,
}

/// Year-bucket access shared by both record types.
pub trait TemporalRecord {
    fn year_category(&self) -> Option<YearCategory>;
}

impl TemporalRecord for BreadRecord {
    fn year_category(&self) -> Option<YearCategory> {
        self.year_category
    }
}

impl TemporalRecord for HistoryRecord {
    fn year_category(&self) -> Option<YearCategory> {
        self.year_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_sentinel() {
        assert_eq!(ImageRef::from_raw("none"), ImageRef::None);
        assert_eq!(ImageRef::from_raw(" None "), ImageRef::None);
        assert_eq!(ImageRef::from_raw(""), ImageRef::None);
        assert_eq!(
            ImageRef::from_raw("pyramid.jpg"),
            ImageRef::File("pyramid.jpg".to_string())
        );
    }

    #[test]
    fn test_mappable_coordinates() {
        assert!(Coordinates::new(31.2, 29.9).is_mappable());
        assert!(!Coordinates::new(f64::NAN, 29.9).is_mappable());
        assert!(!Coordinates::new(31.2, f64::INFINITY).is_mappable());
    }
}
