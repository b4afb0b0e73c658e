//! Fixed class vocabulary for the annotated tool dataset.
//!
//! YOLO annotations carry a numeric class id. The CSV output carries the
//! class name, taken from a small fixed table. Ids outside the table are
//! classified as [`ClassLabel::Unknown`] and render as the fallback label.

use serde::Serialize;
use std::fmt;

/// Label written for ids that are not in the table.
pub const FALLBACK_LABEL: &str = "funnel";

/// A class id classified against the known label table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    Funnel,
    Wrench,
    Generator,
    /// An id with no entry in the table. Keeps the original id for reporting.
    Unknown(i64),
}

impl ClassLabel {
    /// Classifies a numeric class id.
    pub fn from_id(class_id: i64) -> Self {
        match class_id {
            0 => ClassLabel::Funnel,
            1 => ClassLabel::Wrench,
            2 => ClassLabel::Generator,
            other => ClassLabel::Unknown(other),
        }
    }

    /// Returns the label string written to the CSV.
    ///
    /// Unknown ids collapse onto [`FALLBACK_LABEL`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Funnel => "funnel",
            ClassLabel::Wrench => "wrench",
            ClassLabel::Generator => "generator",
            ClassLabel::Unknown(_) => FALLBACK_LABEL,
        }
    }

    /// Returns true if the id had no entry in the table.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ClassLabel::Unknown(_))
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a class id straight to its output label.
#[inline]
pub fn resolve(class_id: i64) -> &'static str {
    ClassLabel::from_id(class_id).as_str()
}
