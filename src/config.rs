//! Run configuration, passed explicitly into every pipeline entry point.

use std::path::{Path, PathBuf};

/// Default image directory, relative to the working directory.
pub const DEFAULT_IMAGE_DIR: &str = "images";
/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "labels.csv";

/// Where to read annotations and images from, where to write the table,
/// and how to treat per-file problems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub annotation_dir: PathBuf,
    pub image_dir: PathBuf,
    pub output_path: PathBuf,
    /// Skip files that fail to convert instead of aborting the run.
    pub keep_going: bool,
    /// Treat class ids outside the label table as errors.
    pub strict_classes: bool,
}

impl Config {
    /// Creates a configuration with the all-or-nothing default policy.
    pub fn new(
        annotation_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            annotation_dir: annotation_dir.into(),
            image_dir: image_dir.into(),
            output_path: output_path.into(),
            keep_going: false,
            strict_classes: false,
        }
    }

    /// Uses the default image directory and output file.
    pub fn with_defaults(annotation_dir: impl Into<PathBuf>) -> Self {
        Self::new(annotation_dir, DEFAULT_IMAGE_DIR, DEFAULT_OUTPUT_PATH)
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn strict_classes(mut self, strict_classes: bool) -> Self {
        self.strict_classes = strict_classes;
        self
    }

    pub fn annotation_dir(&self) -> &Path {
        &self.annotation_dir
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
