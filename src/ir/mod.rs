//! Data model and file formats for yolo2csv.
//!
//! Annotations come in as normalized YOLO center boxes ([`NormalizedBox`]),
//! are converted to truncated pixel boxes ([`AbsoluteBox`]) and leave as rows
//! of the output table ([`DatasetRow`]).
//!
//! # Example
//!
//! ```
//! use yolo2csv::ir::{ClassLabel, DatasetRow, ImageDimensions, NormalizedBox};
//!
//! let bbox = NormalizedBox::new(1, 0.5, 0.5, 0.2, 0.4);
//! let abs = bbox.to_absolute(ImageDimensions::new(200.0, 100.0))?;
//! let row = DatasetRow::new("img_001", &abs, ClassLabel::from_id(bbox.class_id));
//!
//! assert_eq!((row.xmin, row.ymin, row.xmax, row.ymax), (80, 30, 120, 70));
//! assert_eq!(row.class_name, "wrench");
//! # Ok::<(), yolo2csv::ir::CoordinateOutOfRange>(())
//! ```

mod bbox;
pub mod io_tfod_csv;
pub mod io_yolo;
pub mod label;
mod model;

// Re-export core types for convenient access
pub use bbox::{transform, AbsoluteBox, CoordinateOutOfRange, ImageDimensions, NormalizedBox};
pub use io_yolo::AnnotationFile;
pub use label::ClassLabel;
pub use model::{Dataset, DatasetRow, CSV_HEADER};
