//! Document sinks.
//!
//! A sink receives [`Operation`]s and turns them into a concrete document.
//! The converter only decides the order and content of the calls; fonts,
//! sizes and table styles belong to the sink.
//!
//! # Example
//!
//! ```
//! use mdmerge::model::Operation;
//! use mdmerge::sink::{apply, RecordingSink, SinkCall};
//!
//! let mut sink = RecordingSink::new();
//! apply(&mut sink, &Operation::heading("Results", 2)).unwrap();
//!
//! assert_eq!(
//!     sink.calls(),
//!     [SinkCall::AddHeading { text: "Results".into(), level: 2 }]
//! );
//! ```

mod recording;

pub use recording::{CallLog, RecordingSink, SinkCall};

use std::path::Path;

use crate::error::Result;
use crate::model::Operation;

/// Receiver for the runs of one paragraph.
pub trait ParagraphSink {
    /// Append a run with its style flags.
    fn add_run(&mut self, text: &str, bold: bool, italic: bool) -> Result<()>;
}

/// Receiver for the cells of one table.
pub trait TableSink {
    /// Fill a cell. `is_header_row` is true for every cell of row 0.
    fn set_cell(&mut self, row: usize, col: usize, text: &str, is_header_row: bool) -> Result<()>;
}

/// A document that operations can be applied to.
pub trait DocumentSink {
    /// Handle returned by [`add_paragraph`](DocumentSink::add_paragraph).
    type Paragraph: ParagraphSink;

    /// Handle returned by [`add_table`](DocumentSink::add_table).
    type Table: TableSink;

    /// Append a heading block at `level`.
    fn add_heading(&mut self, text: &str, level: u8) -> Result<()>;

    /// Append an empty paragraph and return it for runs.
    fn add_paragraph(&mut self) -> Result<&mut Self::Paragraph>;

    /// Append a `rows` x `cols` table and return it for cells.
    fn add_table(&mut self, rows: usize, cols: usize) -> Result<&mut Self::Table>;

    /// Append a page break.
    fn add_page_break(&mut self) -> Result<()>;

    /// Write the document to `path`.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Apply one operation to a sink.
pub fn apply<S: DocumentSink + ?Sized>(sink: &mut S, op: &Operation) -> Result<()> {
    match op {
        Operation::Heading { text, level } => sink.add_heading(text, *level),
        Operation::Paragraph { runs } => {
            let para = sink.add_paragraph()?;
            for run in runs {
                para.add_run(&run.text, run.bold, run.italic)?;
            }
            Ok(())
        }
        Operation::Table { grid } => {
            let table = sink.add_table(grid.row_count(), grid.column_count())?;
            for (r, row) in grid.rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    table.set_cell(r, c, cell, r == 0)?;
                }
            }
            Ok(())
        }
        Operation::PageBreak => sink.add_page_break(),
    }
}

/// Apply every operation from `ops` in order. Returns the count applied.
pub fn apply_all<S, I>(sink: &mut S, ops: I) -> Result<usize>
where
    S: DocumentSink + ?Sized,
    I: IntoIterator<Item = Operation>,
{
    let mut count = 0;
    for op in ops {
        apply(sink, &op)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StyledRun, TableGrid};

    #[test]
    fn test_apply_paragraph() {
        let mut sink = RecordingSink::new();
        let op = Operation::paragraph(vec![StyledRun::plain("a "), StyledRun::italic("b")]);
        apply(&mut sink, &op).unwrap();

        assert_eq!(
            sink.calls(),
            [
                SinkCall::AddParagraph,
                SinkCall::AddRun {
                    text: "a ".into(),
                    bold: false,
                    italic: false
                },
                SinkCall::AddRun {
                    text: "b".into(),
                    bold: false,
                    italic: true
                },
            ]
        );
    }

    #[test]
    fn test_apply_table_marks_header() {
        let mut sink = RecordingSink::new();
        let grid = TableGrid::from_rows([["A", "B"], ["1", "2"]]);
        apply(&mut sink, &Operation::table(grid)).unwrap();

        let calls = sink.calls();
        assert_eq!(calls[0], SinkCall::AddTable { rows: 2, cols: 2 });
        assert_eq!(
            calls[1],
            SinkCall::SetCell {
                row: 0,
                col: 0,
                text: "A".into(),
                is_header_row: true
            }
        );
        assert_eq!(
            calls[4],
            SinkCall::SetCell {
                row: 1,
                col: 1,
                text: "2".into(),
                is_header_row: false
            }
        );
        assert_eq!(calls.len(), 5);
    }

    #[test]
    fn test_apply_all_counts() {
        let mut sink = RecordingSink::new();
        let ops = vec![Operation::heading("H", 1), Operation::PageBreak];
        assert_eq!(apply_all(&mut sink, ops).unwrap(), 2);
        assert_eq!(sink.calls().last(), Some(&SinkCall::AddPageBreak));
    }
}
