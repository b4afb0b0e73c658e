//! YOLO annotation discovery and parsing.
//!
//! Annotation files live flat in one directory, one `<name>.txt` per image.
//! The paired image is `<image_dir>/<name>.jpg`. Only the first line of each
//! annotation file is read: `class_id center_x center_y width height`, with
//! everything but the class id normalized to the image size.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::bbox::{ImageDimensions, NormalizedBox};
use crate::error::Yolo2CsvError;

pub const ANNOTATION_EXTENSION: &str = "txt";
pub const IMAGE_EXTENSION: &str = "jpg";

const FIELD_NAMES: [&str; 5] = ["class_id", "center_x", "center_y", "width", "height"];

/// An annotation file found during directory enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationFile {
    pub path: PathBuf,
    /// File name with the `.txt` extension stripped, for display and the
    /// `filename` column. Lossy if the name is not valid UTF-8.
    pub base_name: String,
    stem: OsString,
}

impl AnnotationFile {
    /// Builds an annotation file from its path, deriving the base name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path.file_stem().map(OsStr::to_os_string).unwrap_or_default();
        let base_name = stem.to_string_lossy().into_owned();
        Self {
            path,
            base_name,
            stem,
        }
    }

    /// Where the paired image is expected to be.
    ///
    /// Built from the raw file stem, so names that are not valid UTF-8 still
    /// pair with their image.
    pub fn expected_image_path(&self, image_dir: &Path) -> PathBuf {
        let mut name = self.stem.clone();
        name.push(".");
        name.push(IMAGE_EXTENSION);
        image_dir.join(name)
    }
}

/// Result of pairing one annotation file with its image.
pub type LocatedFile = (AnnotationFile, Result<PathBuf, Yolo2CsvError>);

/// Lists annotation files and pairs each with its image, keeping per-file
/// failures instead of stopping at the first one.
///
/// # Errors
/// Fails only if the annotation directory cannot be listed.
pub fn locate_each(
    annotation_dir: &Path,
    image_dir: &Path,
) -> Result<Vec<LocatedFile>, Yolo2CsvError> {
    Ok(discover_annotation_files(annotation_dir)?
        .into_iter()
        .map(|file| {
            let image_path = find_image_for_annotation(&file, image_dir);
            (file, image_path)
        })
        .collect())
}

/// Lists annotation files and pairs each with its image.
///
/// All-or-nothing form of [`locate_each`]: fails on the first annotation whose
/// image does not exist.
pub fn locate(
    annotation_dir: &Path,
    image_dir: &Path,
) -> Result<Vec<(AnnotationFile, PathBuf)>, Yolo2CsvError> {
    locate_each(annotation_dir, image_dir)?
        .into_iter()
        .map(|(file, image_path)| Ok((file, image_path?)))
        .collect()
}

/// Lists the `.txt` files directly inside `annotation_dir`, sorted by file name.
///
/// Subdirectories are not descended into and hidden files are skipped.
pub fn discover_annotation_files(
    annotation_dir: &Path,
) -> Result<Vec<AnnotationFile>, Yolo2CsvError> {
    if !annotation_dir.is_dir() {
        return Err(Yolo2CsvError::AnnotationDirInvalid {
            path: annotation_dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(annotation_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| Yolo2CsvError::AnnotationDirInvalid {
            path: annotation_dir.to_path_buf(),
            message: format!("failed while listing directory: {source}"),
        })?;

        if entry.file_type().is_file() && is_annotation_file(entry.path()) {
            files.push(AnnotationFile::from_path(entry.path()));
        }
    }

    log::debug!(
        "found {} annotation file(s) in {}",
        files.len(),
        annotation_dir.display()
    );
    Ok(files)
}

/// Returns the paired image path, or `MissingImage` if it is not a file.
pub fn find_image_for_annotation(
    file: &AnnotationFile,
    image_dir: &Path,
) -> Result<PathBuf, Yolo2CsvError> {
    let expected = file.expected_image_path(image_dir);
    if expected.is_file() {
        Ok(expected)
    } else {
        Err(Yolo2CsvError::MissingImage {
            annotation_path: file.path.clone(),
            expected_image: expected,
        })
    }
}

/// Reads width and height from the image header.
pub fn read_image_dimensions(path: &Path) -> Result<ImageDimensions, Yolo2CsvError> {
    let size = imagesize::size(path).map_err(|source| Yolo2CsvError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ImageDimensions::new(size.width as f64, size.height as f64))
}

/// Reads and parses the first line of an annotation file.
pub fn parse_annotation_file(file: &AnnotationFile) -> Result<NormalizedBox, Yolo2CsvError> {
    let reader = BufReader::new(
        File::open(&file.path).map_err(|e| Yolo2CsvError::file_io(&file.path, e))?,
    );
    let first_line = read_first_line(reader, &file.path)?;
    parse_annotation_line(&first_line, &file.path)
}

fn read_first_line<R: BufRead>(mut reader: R, path: &Path) -> Result<String, Yolo2CsvError> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(_) => Ok(line),
        Err(err) if err.kind() == ErrorKind::InvalidData => {
            Err(Yolo2CsvError::MalformedAnnotation {
                path: path.to_path_buf(),
                message: "first line is not valid UTF-8".to_string(),
            })
        }
        Err(err) => Err(Yolo2CsvError::file_io(path, err)),
    }
}

/// Parses one annotation line into a normalized box.
///
/// The line is split on single spaces and every field must be a finite
/// number. Fields past the fifth are checked but otherwise ignored.
pub fn parse_annotation_line(line: &str, path: &Path) -> Result<NormalizedBox, Yolo2CsvError> {
    let malformed = |message: String| Yolo2CsvError::MalformedAnnotation {
        path: path.to_path_buf(),
        message,
    };

    let line = strip_line_terminator(line);
    if line.trim().is_empty() {
        return Err(malformed("annotation is empty".to_string()));
    }

    let mut values = [0.0f64; 5];
    let mut count = 0usize;

    for (index, raw) in line.split(' ').enumerate() {
        let token = raw.trim();
        let field = FIELD_NAMES.get(index).copied().unwrap_or("extra field");

        if token.is_empty() {
            return Err(malformed(format!(
                "empty {field} at position {}; fields must be separated by single spaces",
                index + 1
            )));
        }

        let value = token
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid {field} '{token}'; expected a number")))?;

        if !value.is_finite() {
            return Err(malformed(format!("{field} '{token}' is not finite")));
        }

        if index < values.len() {
            values[index] = value;
        }
        count += 1;
    }

    if count < values.len() {
        return Err(malformed(format!("expected 5 fields, found {count}")));
    }

    let [class_id, center_x, center_y, width, height] = values;

    Ok(NormalizedBox::new(
        class_id.trunc() as i64,
        center_x,
        center_y,
        width,
        height,
    ))
}

/// Fuzz-only entrypoint for single-line annotation parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_annotation_line(input: &str) -> Result<(), Yolo2CsvError> {
    let _ = parse_annotation_line(input, Path::new("<fuzz>"))?;
    Ok(())
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_annotation_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    if name.as_encoded_bytes().starts_with(b".") {
        return false;
    }

    path.extension() == Some(OsStr::new(ANNOTATION_EXTENSION))
}
