//! Document operations produced by the converter.

use super::{StyledRun, TableGrid};
use serde::{Deserialize, Serialize};

/// One structured edit to apply to a document sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// A heading block
    Heading {
        /// Heading text
        text: String,
        /// Heading level (1-4)
        level: u8,
    },

    /// A paragraph made of styled runs. An empty run list is a blank spacer.
    Paragraph {
        /// Runs in order
        runs: Vec<StyledRun>,
    },

    /// A table whose first row is the header
    Table {
        /// Cell grid
        grid: TableGrid,
    },

    /// A page break
    PageBreak,
}

impl Operation {
    /// Create a heading operation.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Operation::Heading {
            text: text.into(),
            level,
        }
    }

    /// Create a paragraph operation.
    pub fn paragraph(runs: Vec<StyledRun>) -> Self {
        Operation::Paragraph { runs }
    }

    /// Create the blank paragraph used as spacing.
    pub fn spacer() -> Self {
        Operation::Paragraph { runs: Vec::new() }
    }

    /// Create a table operation.
    pub fn table(grid: TableGrid) -> Self {
        Operation::Table { grid }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Operation::Heading { .. })
    }

    /// Check if this is a blank spacer paragraph.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Operation::Paragraph { runs } if runs.is_empty())
    }

    /// Short name of the operation kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Heading { .. } => "heading",
            Operation::Paragraph { .. } => "paragraph",
            Operation::Table { .. } => "table",
            Operation::PageBreak => "page_break",
        }
    }

    /// Get plain text content of the operation.
    pub fn plain_text(&self) -> String {
        match self {
            Operation::Heading { text, .. } => text.clone(),
            Operation::Paragraph { runs } => super::run::plain_text(runs),
            Operation::Table { grid } => grid.plain_text(),
            Operation::PageBreak => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer() {
        assert!(Operation::spacer().is_spacer());
        assert!(!Operation::paragraph(vec![StyledRun::plain("x")]).is_spacer());
        assert!(!Operation::PageBreak.is_spacer());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Operation::heading("Title", 1)).unwrap();
        assert_eq!(json, r#"{"type":"heading","text":"Title","level":1}"#);

        let json = serde_json::to_string(&Operation::PageBreak).unwrap();
        assert_eq!(json, r#"{"type":"page_break"}"#);
    }

    #[test]
    fn test_plain_text() {
        let op = Operation::paragraph(vec![StyledRun::plain("a "), StyledRun::bold("b")]);
        assert_eq!(op.plain_text(), "a b");
        assert_eq!(op.kind(), "paragraph");
    }
}
