//! Merge results and statistics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::ConversionStats;
use crate::parser::ParseWarning;

/// Outcome for one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content was appended
    Merged,
    /// File was skipped
    Skipped,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Input path
    pub path: PathBuf,

    /// Merged or skipped
    pub status: FileStatus,

    /// Counters for this file, trailing page break included
    pub stats: ConversionStats,

    /// Recoverable parse problems
    pub warnings: Vec<ParseWarning>,

    /// Why the file was skipped
    pub skip_reason: Option<String>,
}

impl FileReport {
    /// Report for a merged file.
    pub fn merged(path: PathBuf, stats: ConversionStats, warnings: Vec<ParseWarning>) -> Self {
        Self {
            path,
            status: FileStatus::Merged,
            stats,
            warnings,
            skip_reason: None,
        }
    }

    /// Report for a skipped file.
    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Skipped,
            stats: ConversionStats::default(),
            warnings: Vec::new(),
            skip_reason: Some(reason.into()),
        }
    }

    /// Check if the file was merged.
    pub fn is_merged(&self) -> bool {
        self.status == FileStatus::Merged
    }
}

/// Summary of a whole merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Base document requested by the caller
    pub base_document: Option<PathBuf>,

    /// Set when the base could not be loaded and a fresh document was used
    pub base_fallback: Option<String>,

    /// Where the document was saved
    pub output: Option<PathBuf>,

    /// Per-file outcomes, in input order
    pub files: Vec<FileReport>,

    /// Totals over every applied operation
    pub stats: ConversionStats,
}

impl MergeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of merged files.
    pub fn merged_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_merged()).count()
    }

    /// Number of skipped files.
    pub fn skipped_count(&self) -> usize {
        self.files.len() - self.merged_count()
    }

    /// Number of recoverable problems, including skipped files and base fallback.
    pub fn warning_count(&self) -> usize {
        let parse: usize = self.files.iter().map(|f| f.warnings.len()).sum();
        parse + self.skipped_count() + usize::from(self.base_fallback.is_some())
    }

    /// Check if anything needed recovery.
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }
}
