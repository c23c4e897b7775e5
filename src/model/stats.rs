//! Conversion statistics.

use serde::{Deserialize, Serialize};

use super::Operation;

/// Counters collected while applying operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs with text
    pub paragraph_count: u32,

    /// Number of blank spacer paragraphs
    pub spacer_count: u32,

    /// Number of styled runs
    pub run_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table rows, headers included
    pub table_row_count: u32,

    /// Number of table rows padded or truncated to the header width
    pub normalized_row_count: u32,

    /// Number of page breaks
    pub page_break_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one applied operation.
    pub fn record(&mut self, op: &Operation) {
        match op {
            Operation::Heading { .. } => self.heading_count += 1,
            Operation::Paragraph { runs } if runs.is_empty() => self.spacer_count += 1,
            Operation::Paragraph { runs } => {
                self.paragraph_count += 1;
                self.run_count += runs.len() as u32;
            }
            Operation::Table { grid } => {
                self.table_count += 1;
                self.table_row_count += grid.row_count() as u32;
            }
            Operation::PageBreak => self.page_break_count += 1,
        }
    }

    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.spacer_count += other.spacer_count;
        self.run_count += other.run_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.normalized_row_count += other.normalized_row_count;
        self.page_break_count += other.page_break_count;
    }

    /// Total operations counted.
    pub fn operation_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.spacer_count
            + self.table_count
            + self.page_break_count
    }
}
