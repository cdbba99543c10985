//! Detail dialog content derivation
//!
//! The dialog collaborator receives fully derived content; it never probes
//! record fields or compares against raw sentinels. Bread vs history
//! rendering is decided by the selection tag alone.

use cm_core::records::ImageRef;
use cm_core::selection::Selection;

/// Placeholder shown when a history record has no image
pub const NO_IMAGE_PLACEHOLDER: &str = "No image available.";

/// Image slot of the detail dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailImage {
    /// File name resolved against the static asset root
    Asset(String),
    /// Textual placeholder; never rendered as an image element
    Placeholder(&'static str),
}

/// Fully derived dialog content
#[derive(Debug, Clone, PartialEq)]
pub struct DetailContent {
    pub heading: String,
    /// Labeled provenance fields, in display order
    pub fields: Vec<(&'static str, String)>,
    pub body: String,
    pub image: DetailImage,
}

/// Derive dialog content for `selection`.
///
/// Returns `None` when nothing is selected (the dialog stays closed).
pub fn detail_content(selection: &Selection) -> Option<DetailContent> {
    match selection {
        Selection::None => None,
        Selection::Bread(record) => Some(DetailContent {
            heading: record.name.clone(),
            fields: vec![
                ("Origin", record.origin_place.clone()),
                ("First recorded", record.origin_year.clone()),
            ],
            body: record.description.clone(),
            image: DetailImage::Asset(record.image_name.clone()),
        }),
        Selection::History(record) => Some(DetailContent {
            heading: format!("{} - {}", record.era, record.title),
            fields: Vec::new(),
            body: record.description.clone(),
            image: match &record.image {
                ImageRef::File(name) => DetailImage::Asset(name.clone()),
                ImageRef::None => DetailImage::Placeholder(NO_IMAGE_PLACEHOLDER),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::records::{BreadRecord, Coordinates, HistoryRecord};
    use std::sync::Arc;

    #[test]
    fn test_bread_content_uses_record_fields() {
        let selection = Selection::Bread(Arc::new(BreadRecord {
            name: "Flatbread".to_string(),
            origin_place: "Egypt".to_string(),
            origin_year: "c. 3300 BCE".to_string(),
            description: "Unleavened bread baked on hot stones.".to_string(),
            image_name: "flatbread.jpg".to_string(),
            coordinates: Coordinates::new(31.2, 29.9),
            year_category: Some(-3300),
        }));

        let content = detail_content(&selection).expect("content");
        assert_eq!(content.heading, "Flatbread");
        assert_eq!(content.fields[0], ("Origin", "Egypt".to_string()));
        assert_eq!(content.image, DetailImage::Asset("flatbread.jpg".to_string()));
    }

    #[test]
    fn test_history_without_image_gets_placeholder() {
        let selection = Selection::History(Arc::new(HistoryRecord {
            era: "BCE 3300".to_string(),
            title: "Early dynastic Egypt".to_string(),
            description: "Unification along the Nile.".to_string(),
            image: ImageRef::None,
            coordinates: Coordinates::new(26.0, 32.0),
            year_category: Some(-3300),
        }));

        let content = detail_content(&selection).expect("content");
        assert_eq!(content.heading, "BCE 3300 - Early dynastic Egypt");
        assert_eq!(content.image, DetailImage::Placeholder(NO_IMAGE_PLACEHOLDER));
    }

    #[test]
    fn test_no_selection_means_no_dialog() {
        assert!(detail_content(&Selection::None).is_none());
    }
}
