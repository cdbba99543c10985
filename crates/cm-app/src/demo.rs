//! Built-in demo datasets
//!
//! In-memory row sources so the binary runs without any CSV files on disk.
//! The rows go through the same parser and index as file-backed data.

use async_trait::async_trait;
use cm_core::records::DatasetKind;
use cm_core::rows::{RawRow, RowSource};

/// Row source backed by a fixed in-memory table
pub struct DemoRowSource {
    dataset: DatasetKind,
    name: &'static str,
    columns: &'static [&'static str],
    rows: &'static [&'static [&'static str]],
}

#[async_trait]
impl RowSource for DemoRowSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<RawRow>> {
        let rows = self
            .rows
            .iter()
            .map(|values| {
                self.columns
                    .iter()
                    .zip(values.iter())
                    .map(|(column, value)| (column.to_string(), value.to_string()))
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    fn dataset(&self) -> DatasetKind {
        self.dataset
    }

    fn source_name(&self) -> &str {
        self.name
    }
}

const BREAD_COLUMNS: &[&str] = &[
    "name",
    "origin_place",
    "origin_year",
    "description",
    "image",
    "latitude",
    "longitude",
    "year_category",
];

const BREAD_ROWS: &[&[&str]] = &[
    &[
        "Flatbread",
        "Egypt",
        "c. 3300 BCE",
        "Unleavened bread baked on hot stones along the Nile delta.",
        "flatbread.jpg",
        "31.2",
        "29.9",
        "-3300",
    ],
    &[
        "Sourdough",
        "Egypt",
        "c. 3000 BCE",
        "Naturally leavened loaves from wild yeast cultures.",
        "sourdough.jpg",
        "30.0",
        "31.2",
        "-3000",
    ],
    &[
        "Pita",
        "Levant",
        "c. 1000 BCE",
        "Pocket bread baked at high heat.",
        "pita.jpg",
        "31.77",
        "35.21",
        "-1000",
    ],
    &[
        "Baguette",
        "France",
        "19th century",
        "Long thin wheat loaf with a crisp crust.",
        "baguette.jpg",
        "48.85",
        "2.35",
        "1800",
    ],
];

const HISTORY_COLUMNS: &[&str] = &[
    "era",
    "title",
    "description",
    "image",
    "latitude",
    "longitude",
    "year_category",
];

const HISTORY_ROWS: &[&[&str]] = &[
    &[
        "BCE 3300",
        "Early dynastic Egypt",
        "Unification of Upper and Lower Egypt along the Nile.",
        "none",
        "26.0",
        "32.0",
        "-3300",
    ],
    &[
        "BCE 3300",
        "Uruk expansion",
        "Mesopotamian city-states trade across the fertile crescent.",
        "uruk.jpg",
        "31.3",
        "45.6",
        "-3300",
    ],
    &[
        "BCE 1000",
        "Kingdom of David",
        "Consolidation of the Israelite kingdom.",
        "none",
        "31.77",
        "35.21",
        "-1000",
    ],
];

/// The two demo sources, one per dataset
pub fn demo_sources() -> (DemoRowSource, DemoRowSource) {
    (
        DemoRowSource {
            dataset: DatasetKind::Bread,
            name: "demo-bread",
            columns: BREAD_COLUMNS,
            rows: BREAD_ROWS,
        },
        DemoRowSource {
            dataset: DatasetKind::History,
            name: "demo-history",
            columns: HISTORY_COLUMNS,
            rows: HISTORY_ROWS,
        },
    )
}
