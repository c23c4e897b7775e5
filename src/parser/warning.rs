//! Non-fatal problems found while parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recoverable problem in the input. Parsing always continues.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A table row was padded or truncated to the header width.
    #[error("line {line}: table row has {found} cells, header has {expected}")]
    MalformedTableRow {
        /// 1-indexed source line
        line: usize,
        /// Header cell count
        expected: usize,
        /// Cells found in the row
        found: usize,
    },

    /// A table block whose header row has no cells; its lines were kept as paragraphs.
    #[error("line {line}: table header has no cells, block kept as text")]
    HeaderlessTable {
        /// 1-indexed source line of the header
        line: usize,
    },

    /// A `*` with no closing partner was kept as literal text.
    #[error("line {line}: unterminated emphasis marker")]
    UnmatchedEmphasis {
        /// 1-indexed source line
        line: usize,
    },

    /// A marker pair with nothing between it, such as the `**` in `2 ** 3`.
    #[error("line {line}: empty emphasis span")]
    EmptyEmphasis {
        /// 1-indexed source line
        line: usize,
    },
}

impl ParseWarning {
    /// Source line the warning refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::MalformedTableRow { line, .. }
            | ParseWarning::HeaderlessTable { line }
            | ParseWarning::UnmatchedEmphasis { line }
            | ParseWarning::EmptyEmphasis { line } => *line,
        }
    }
}

impl From<ParseWarning> for crate::Error {
    fn from(warning: ParseWarning) -> Self {
        match warning {
            ParseWarning::MalformedTableRow {
                line,
                expected,
                found,
            } => crate::Error::MalformedTableRow {
                line,
                expected,
                found,
            },
            other => crate::Error::Other(other.to_string()),
        }
    }
}
