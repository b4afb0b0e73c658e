//! Output table model.
//!
//! A [`Dataset`] is the ordered list of rows that ends up in `labels.csv`.
//! Rows are built once during assembly and never mutated afterwards.

use serde::Serialize;

use super::bbox::AbsoluteBox;
use super::label::ClassLabel;

/// Column order of the output table.
pub const CSV_HEADER: [&str; 8] = [
    "filename", "width", "height", "class", "xmin", "ymin", "xmax", "ymax",
];

/// One record of the output table: a single object in a single image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    /// Annotation base name (no directory, no extension).
    pub filename: String,
    /// Box width in pixels, truncated.
    pub width: i64,
    /// Box height in pixels, truncated.
    pub height: i64,
    #[serde(rename = "class")]
    pub class_name: String,
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl DatasetRow {
    /// Builds a row from an annotation base name, its pixel box and label.
    pub fn new(filename: impl Into<String>, bbox: &AbsoluteBox, label: ClassLabel) -> Self {
        Self {
            filename: filename.into(),
            width: bbox.width,
            height: bbox.height,
            class_name: label.as_str().to_string(),
            xmin: bbox.xmin,
            ymin: bbox.ymin,
            xmax: bbox.xmax,
            ymax: bbox.ymax,
        }
    }
}

/// The assembled table, in annotation discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
