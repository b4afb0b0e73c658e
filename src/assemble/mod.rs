//! Dataset assembly: annotation files in, ordered table out.
//!
//! For every annotation file, in sorted order: read the paired image's
//! dimensions, parse the first annotation line, convert it to pixel bounds,
//! resolve the class label and append one row.
//!
//! The default policy is all-or-nothing: the first failing file aborts the
//! run and no dataset is returned. With [`Config::keep_going`] set, failing
//! files are recorded in the [`AssemblyReport`] and left out instead.
//! [`assemble_outcomes`] exposes the per-file results directly.

mod report;

pub use report::{AssemblyIssue, AssemblyReport, IssueCode, Severity};

use std::path::Path;

use crate::config::Config;
use crate::error::Yolo2CsvError;
use crate::ir::io_yolo::{locate_each, parse_annotation_file, read_image_dimensions};
use crate::ir::{AnnotationFile, ClassLabel, Dataset, DatasetRow};

/// An assembled dataset together with its report.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub dataset: Dataset,
    pub report: AssemblyReport,
}

/// The row produced for one annotation file, plus the label classification
/// it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedFile {
    pub row: DatasetRow,
    pub label: ClassLabel,
}

/// Result of converting one annotation file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: AnnotationFile,
    pub result: Result<ConvertedFile, Yolo2CsvError>,
}

/// Assembles the dataset for `config`.
///
/// # Errors
/// Fails if the annotation directory cannot be listed. Unless
/// `config.keep_going` is set, also fails on the first file that cannot be
/// converted.
pub fn assemble(config: &Config) -> Result<Assembly, Yolo2CsvError> {
    let located = locate_each(config.annotation_dir(), config.image_dir())?;

    let mut report = AssemblyReport::new();
    report.files_found = located.len();

    let mut rows = Vec::with_capacity(located.len());

    for (file, image_path) in located {
        let result =
            image_path.and_then(|image| convert_file(&file, &image, config.strict_classes));
        match result {
            Ok(converted) => {
                note_label(&file, converted.label, &mut report);
                rows.push(converted.row);
            }
            Err(err) if config.keep_going => {
                log::warn!("skipping {}: {}", file.path.display(), err);
                report.add(AssemblyIssue::error(
                    IssueCode::SkippedFile,
                    &file.path,
                    err.to_string(),
                ));
            }
            Err(err) => return Err(err),
        }
    }

    report.rows = rows.len();
    log::info!(
        "assembled {} row(s) from {} annotation file(s)",
        report.rows,
        report.files_found
    );

    Ok(Assembly {
        dataset: Dataset::new(rows),
        report,
    })
}

/// Converts every annotation file and returns one outcome per file.
///
/// Never stops early; the caller decides what to do with failures.
pub fn assemble_outcomes(config: &Config) -> Result<Vec<FileOutcome>, Yolo2CsvError> {
    Ok(locate_each(config.annotation_dir(), config.image_dir())?
        .into_iter()
        .map(|(file, image_path)| {
            let result =
                image_path.and_then(|image| convert_file(&file, &image, config.strict_classes));
            FileOutcome { file, result }
        })
        .collect())
}

/// Converts one annotation file whose image has already been located.
///
/// # Errors
/// Fails on an unreadable image header, a malformed first line, a box whose
/// pixel bounds do not fit in `i64`, or (with `strict_classes`) an unknown
/// class id.
pub fn convert_file(
    file: &AnnotationFile,
    image_path: &Path,
    strict_classes: bool,
) -> Result<ConvertedFile, Yolo2CsvError> {
    let dims = read_image_dimensions(image_path)?;
    let bbox = parse_annotation_file(file)?;

    let label = ClassLabel::from_id(bbox.class_id);
    if strict_classes && label.is_unknown() {
        return Err(Yolo2CsvError::UnknownClass {
            path: file.path.clone(),
            class_id: bbox.class_id,
        });
    }

    let abs = bbox
        .to_absolute(dims)
        .map_err(|err| Yolo2CsvError::MalformedAnnotation {
            path: file.path.clone(),
            message: err.to_string(),
        })?;
    log::debug!(
        "{}: {}x{} image, class {} -> {:?}",
        file.base_name,
        dims.width,
        dims.height,
        bbox.class_id,
        abs
    );

    Ok(ConvertedFile {
        row: DatasetRow::new(file.base_name.clone(), &abs, label),
        label,
    })
}

fn note_label(file: &AnnotationFile, label: ClassLabel, report: &mut AssemblyReport) {
    if let ClassLabel::Unknown(class_id) = label {
        log::warn!(
            "{}: class id {} is not in the label table, writing '{}'",
            file.path.display(),
            class_id,
            label
        );
        report.add(AssemblyIssue::warning(
            IssueCode::UnknownClassFallback,
            &file.path,
            format!(
                "class id {} is not in the label table; wrote '{}'",
                class_id, label
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::test_support::bmp_bytes;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        _temp: tempfile::TempDir,
        annotations: PathBuf,
        images: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = tempfile::tempdir().expect("create temp dir");
            let annotations = temp.path().join("annotations");
            let images = temp.path().join("images");
            fs::create_dir_all(&annotations).expect("create annotations dir");
            fs::create_dir_all(&images).expect("create images dir");
            Self {
                _temp: temp,
                annotations,
                images,
            }
        }

        fn add(&self, name: &str, line: &str, width: u32, height: u32) {
            fs::write(self.annotations.join(format!("{name}.txt")), line).expect("write label");
            fs::write(
                self.images.join(format!("{name}.jpg")),
                bmp_bytes(width, height),
            )
            .expect("write image");
        }

        fn config(&self) -> Config {
            Config::new(&self.annotations, &self.images, "unused.csv")
        }
    }

    #[test]
    fn assemble_builds_rows_in_sorted_order() {
        let fx = Fixture::new();
        fx.add("b", "1 0.5 0.5 0.2 0.4\n", 200, 100);
        fx.add("a", "2 0.5 0.5 0.5 0.5\n", 10, 10);

        let assembly = assemble(&fx.config()).expect("assemble");
        let rows = &assembly.dataset.rows;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filename, "a");
        assert_eq!(rows[0].class_name, "generator");
        assert_eq!(rows[1].filename, "b");
        assert_eq!(rows[1].class_name, "wrench");
        assert_eq!((rows[1].xmin, rows[1].ymin, rows[1].xmax, rows[1].ymax), (80, 30, 120, 70));
        assert_eq!((rows[1].width, rows[1].height), (40, 40));
        assert!(assembly.report.is_clean());
        assert_eq!(assembly.report.rows, 2);
    }

    #[test]
    fn assemble_aborts_on_first_failure() {
        let fx = Fixture::new();
        fx.add("a", "0 0.5 0.5 0.2 0.2\n", 10, 10);
        fx.add("b", "0 0.5 0.5\n", 10, 10);

        let err = assemble(&fx.config()).unwrap_err();
        assert!(matches!(err, Yolo2CsvError::MalformedAnnotation { .. }));
    }

    #[test]
    fn assemble_keep_going_skips_failed_files() {
        let fx = Fixture::new();
        fx.add("a", "0 0.5 0.5 0.2 0.2\n", 10, 10);
        fs::write(fx.annotations.join("orphan.txt"), "0 0.5 0.5 0.2 0.2\n").expect("write");

        let assembly = assemble(&fx.config().keep_going(true)).expect("assemble");

        assert_eq!(assembly.dataset.len(), 1);
        assert_eq!(assembly.report.files_found, 2);
        assert_eq!(assembly.report.error_count(), 1);
        assert_eq!(assembly.report.issues[0].code, IssueCode::SkippedFile);
    }

    #[test]
    fn assemble_reports_unknown_class_fallback() {
        let fx = Fixture::new();
        fx.add("a", "99 0.5 0.5 0.2 0.2\n", 10, 10);

        let assembly = assemble(&fx.config()).expect("assemble");

        assert_eq!(assembly.dataset.rows[0].class_name, "funnel");
        assert_eq!(assembly.report.warning_count(), 1);
        assert_eq!(
            assembly.report.issues[0].code,
            IssueCode::UnknownClassFallback
        );
    }

    #[test]
    fn assemble_strict_classes_rejects_unknown_ids() {
        let fx = Fixture::new();
        fx.add("a", "7 0.5 0.5 0.2 0.2\n", 10, 10);

        let err = assemble(&fx.config().strict_classes(true)).unwrap_err();
        assert!(matches!(
            err,
            Yolo2CsvError::UnknownClass { class_id: 7, .. }
        ));
    }

    #[test]
    fn assemble_outcomes_reports_every_file() {
        let fx = Fixture::new();
        fx.add("a", "0 0.5 0.5 0.2 0.2\n", 10, 10);
        fs::write(fx.annotations.join("b.txt"), "0 0.5 0.5 0.2 0.2\n").expect("write");
        fx.add("c", "garbage\n", 10, 10);

        let outcomes = assemble_outcomes(&fx.config()).expect("outcomes");

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(Yolo2CsvError::MissingImage { .. })
        ));
        assert!(matches!(
            outcomes[2].result,
            Err(Yolo2CsvError::MalformedAnnotation { .. })
        ));
    }

    #[test]
    fn assemble_rejects_boxes_outside_pixel_range() {
        let fx = Fixture::new();
        fx.add("big", "0 1e308 0.5 0.2 0.2\n", 200, 100);

        let err = assemble(&fx.config()).unwrap_err();
        match err {
            Yolo2CsvError::MalformedAnnotation { path, message } => {
                assert_eq!(path, fx.annotations.join("big.txt"));
                assert!(message.contains("xmin"), "{message}");
            }
            other => panic!("expected MalformedAnnotation, got {other:?}"),
        }

        let fx = Fixture::new();
        fx.add("big", "0 1e20 0.5 0.2 0.2\n", 200, 100);
        fx.add("ok", "0 0.5 0.5 0.2 0.2\n", 200, 100);

        let assembly = assemble(&fx.config().keep_going(true)).expect("assemble");
        assert_eq!(assembly.dataset.len(), 1);
        assert_eq!(assembly.dataset.rows[0].filename, "ok");
        assert_eq!(assembly.report.error_count(), 1);
        assert!(assembly.report.issues[0].message.contains("does not fit"));
    }

    #[test]
    fn assemble_empty_directory_yields_empty_dataset() {
        let fx = Fixture::new();
        let assembly = assemble(&fx.config()).expect("assemble");
        assert!(assembly.dataset.is_empty());
        assert_eq!(assembly.report.files_found, 0);
    }
}
