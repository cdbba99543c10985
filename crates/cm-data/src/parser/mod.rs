//! Row-to-record conversion for the two event datasets
//!
//! A pure transform: raw string-keyed rows in, typed records out. Nothing
//! here touches the transport, and nothing here fails — malformed fields
//! degrade to sentinel values (`NaN` coordinates, unmapped year buckets)
//! so downstream code never re-touches raw string keys.

use cm_core::records::{BreadRecord, Coordinates, HistoryRecord, ImageRef, YearCategory};
use cm_core::rows::RawRow;

/// Column names per dataset. Dataset-specific and passed through from the
/// header row unchanged.
pub mod columns {
    pub mod bread {
        pub const NAME: &str = "name";
        pub const ORIGIN_PLACE: &str = "origin_place";
        pub const ORIGIN_YEAR: &str = "origin_year";
        pub const DESCRIPTION: &str = "description";
        pub const IMAGE: &str = "image";
        pub const LATITUDE: &str = "latitude";
        pub const LONGITUDE: &str = "longitude";
        pub const YEAR_CATEGORY: &str = "year_category";
    }

    pub mod history {
        pub const ERA: &str = "era";
        pub const TITLE: &str = "title";
        pub const DESCRIPTION: &str = "description";
        pub const IMAGE: &str = "image";
        pub const LATITUDE: &str = "latitude";
        pub const LONGITUDE: &str = "longitude";
        pub const YEAR_CATEGORY: &str = "year_category";
    }
}

/// Missing columns read as empty strings; emptiness then falls out of the
/// field parsers like any other malformed value.
fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or_default()
}

/// Locale-invariant decimal parse; anything unparseable becomes `NaN`.
fn parse_coordinate(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_coordinates(row: &RawRow, lat_column: &str, lon_column: &str) -> Coordinates {
    Coordinates::new(
        parse_coordinate(field(row, lat_column)),
        parse_coordinate(field(row, lon_column)),
    )
}

/// Integer bucket key; `None` marks an unmapped bucket.
fn parse_year_category(raw: &str) -> Option<YearCategory> {
    let trimmed = raw.trim();
    match trimmed.parse::<YearCategory>() {
        Ok(year) => Some(year),
        Err(_) => {
            if !trimmed.is_empty() {
                tracing::debug!(value = trimmed, "unparseable year category, bucket unmapped");
            }
            None
        }
    }
}

/// Convert one raw bread row into a typed record
pub fn parse_bread_row(row: &RawRow) -> BreadRecord {
    use columns::bread as col;

    BreadRecord {
        name: field(row, col::NAME).to_string(),
        origin_place: field(row, col::ORIGIN_PLACE).to_string(),
        origin_year: field(row, col::ORIGIN_YEAR).to_string(),
        description: field(row, col::DESCRIPTION).to_string(),
        image_name: field(row, col::IMAGE).trim().to_string(),
        coordinates: parse_coordinates(row, col::LATITUDE, col::LONGITUDE),
        year_category: parse_year_category(field(row, col::YEAR_CATEGORY)),
    }
}

/// Convert one raw history row into a typed record
pub fn parse_history_row(row: &RawRow) -> HistoryRecord {
    use columns::history as col;

    HistoryRecord {
        era: field(row, col::ERA).to_string(),
        title: field(row, col::TITLE).to_string(),
        description: field(row, col::DESCRIPTION).to_string(),
        image: ImageRef::from_raw(field(row, col::IMAGE)),
        coordinates: parse_coordinates(row, col::LATITUDE, col::LONGITUDE),
        year_category: parse_year_category(field(row, col::YEAR_CATEGORY)),
    }
}

/// Convert a full dataset of bread rows, in row order
pub fn parse_bread_rows(rows: &[RawRow]) -> Vec<BreadRecord> {
    rows.iter().map(parse_bread_row).collect()
}

/// Convert a full dataset of history rows, in row order
pub fn parse_history_rows(rows: &[RawRow]) -> Vec<HistoryRecord> {
    rows.iter().map(parse_history_row).collect()
}
