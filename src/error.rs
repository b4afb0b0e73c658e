use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolo2csv operations.
#[derive(Debug, Error)]
pub enum Yolo2CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid annotation directory {path}: {message}")]
    AnnotationDirInvalid { path: PathBuf, message: String },

    #[error("No image found for annotation {annotation_path}: expected {expected_image}")]
    MissingImage {
        annotation_path: PathBuf,
        expected_image: PathBuf,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Malformed annotation in {path}: {message}")]
    MalformedAnnotation { path: PathBuf, message: String },

    #[error("Unknown class id {class_id} in {path}")]
    UnknownClass { path: PathBuf, class_id: i64 },

    #[error("Failed to write CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to serialize assembly report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

impl Yolo2CsvError {
    /// Wraps an IO error with the path it happened on.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Yolo2CsvError::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by an absent or unreadable paired image.
    pub fn is_missing_image(&self) -> bool {
        matches!(
            self,
            Yolo2CsvError::MissingImage { .. } | Yolo2CsvError::ImageDimensionRead { .. }
        )
    }
}
