//! Assembly report types.
//!
//! Records what happened while turning annotation files into rows: how many
//! files were found, how many rows were produced, and every condition worth
//! telling the user about (unknown class ids, skipped files).

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Summary of one assembly run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AssemblyReport {
    /// Annotation files found in the annotation directory.
    pub files_found: usize,
    /// Rows in the assembled dataset.
    pub rows: usize,
    /// Output file, once the table has been written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub issues: Vec<AssemblyIssue>,
}

impl AssemblyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: AssemblyIssue) {
        self.issues.push(issue);
    }

    /// Number of files that were skipped because they failed to convert.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(
                f,
                "Assembled {} row(s) from {} annotation file(s): no issues found",
                self.rows, self.files_found
            );
        }

        writeln!(
            f,
            "Assembled {} row(s) from {} annotation file(s) with {} error(s) and {} warning(s):",
            self.rows,
            self.files_found,
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single condition noticed while assembling one annotation file.
#[derive(Clone, Debug, Serialize)]
pub struct AssemblyIssue {
    pub severity: Severity,
    pub code: IssueCode,
    /// The annotation file the issue belongs to.
    pub file: PathBuf,
    pub message: String,
}

impl AssemblyIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn error(code: IssueCode, file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, file, message)
    }

    pub fn warning(code: IssueCode, file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, file, message)
    }
}

impl fmt::Display for AssemblyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity,
            self.code,
            self.file.display(),
            self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The row was written, but with a substituted value.
    Warning,
    /// The file produced no row.
    Error,
}

/// A stable code identifying the type of assembly issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// A class id outside the label table was written as the fallback label.
    UnknownClassFallback,
    /// The file failed to convert and was left out of the dataset.
    SkippedFile,
}
