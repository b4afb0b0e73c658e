//! TFOD CSV writer.
//!
//! Writes the assembled [`Dataset`] as the CSV table consumed by TensorFlow
//! Object Detection record generators:
//!
//! ```text
//! filename,width,height,class,xmin,ymin,xmax,ymax
//! img_001,40,40,wrench,80,30,120,70
//! ```
//!
//! All coordinates are integer pixels. Rows keep dataset order and there is
//! no index column. The header is written even when the dataset is empty.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::model::{Dataset, CSV_HEADER};
use crate::error::Yolo2CsvError;

/// Writes a dataset to a CSV file, replacing any existing file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use yolo2csv::ir::{io_tfod_csv::write_labels_csv, Dataset};
///
/// write_labels_csv(Path::new("labels.csv"), &Dataset::default())?;
/// # Ok::<(), yolo2csv::Yolo2CsvError>(())
/// ```
pub fn write_labels_csv(path: &Path, dataset: &Dataset) -> Result<(), Yolo2CsvError> {
    let file = File::create(path).map_err(|e| Yolo2CsvError::file_io(path, e))?;
    let writer = BufWriter::new(file);

    write_rows(writer, dataset, path)?
        .flush()
        .map_err(|e| Yolo2CsvError::file_io(path, e))?;

    log::info!(
        "wrote {} row(s) to {}",
        dataset.len(),
        path.display()
    );
    Ok(())
}

/// Writes a dataset to a CSV string.
///
/// Useful for testing without file I/O.
pub fn to_labels_csv_string(dataset: &Dataset) -> Result<String, Yolo2CsvError> {
    let dummy_path = Path::new("<string>");
    let bytes = write_rows(Vec::new(), dataset, dummy_path)?;

    String::from_utf8(bytes).map_err(|e| {
        Yolo2CsvError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn write_rows<W: Write>(writer: W, dataset: &Dataset, path: &Path) -> Result<W, Yolo2CsvError> {
    let csv_error = |source| Yolo2CsvError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so that an empty dataset still gets one.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for row in &dataset.rows {
        csv_writer.serialize(row).map_err(csv_error)?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| Yolo2CsvError::file_io(path, e.into_error()))
}
