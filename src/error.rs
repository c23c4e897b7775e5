//! Error types for mdmerge library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdmerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting and merging documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input markdown file does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// An input markdown file exists but could not be read as UTF-8 text.
    #[error("Cannot read {}: {reason}", path.display())]
    UnreadableInput {
        /// Path of the input file
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// A table row has a different number of cells than the header row.
    #[error("Table row on line {line} has {found} cells, header has {expected}")]
    MalformedTableRow {
        /// 1-indexed source line of the row
        line: usize,
        /// Header cell count
        expected: usize,
        /// Cell count found in the row
        found: usize,
    },

    /// The base document could not be opened.
    #[error("Cannot load base document {}: {reason}", path.display())]
    UnloadableBaseDocument {
        /// Path of the base document
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// The output document could not be written.
    #[error("Cannot write output {}: {source}", path.display())]
    UnwritableOutput {
        /// Output path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The DOCX package is structurally invalid.
    #[error("Invalid DOCX package: {0}")]
    InvalidPackage(String),

    /// Error generating WordprocessingML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error reading or writing the ZIP container.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error serializing to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if the driver can skip past this error and keep merging.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingInputFile(_)
                | Error::UnreadableInput { .. }
                | Error::MalformedTableRow { .. }
                | Error::UnloadableBaseDocument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingInputFile(PathBuf::from("chapter5.md"));
        assert_eq!(err.to_string(), "Input file not found: chapter5.md");

        let err = Error::MalformedTableRow {
            line: 7,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Table row on line 7 has 2 cells, header has 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(Error::MissingInputFile(PathBuf::from("a.md")).is_recoverable());
        assert!(Error::UnloadableBaseDocument {
            path: PathBuf::from("base.docx"),
            reason: "bad zip".into(),
        }
        .is_recoverable());

        let fatal = Error::UnwritableOutput {
            path: PathBuf::from("/nope/out.docx"),
            source: Box::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };
        assert!(!fatal.is_recoverable());
        assert!(fatal.to_string().contains("denied"));
    }
}
