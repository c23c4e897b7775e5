//! In-memory sink that records every call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DocumentSink, ParagraphSink, TableSink};
use crate::error::Result;
use crate::model::{Operation, StyledRun, TableGrid};

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SinkCall {
    AddHeading {
        text: String,
        level: u8,
    },
    AddParagraph,
    AddRun {
        text: String,
        bold: bool,
        italic: bool,
    },
    AddTable {
        rows: usize,
        cols: usize,
    },
    SetCell {
        row: usize,
        col: usize,
        text: String,
        is_header_row: bool,
    },
    AddPageBreak,
    Save {
        path: PathBuf,
    },
}

/// Ordered list of calls. Also serves as the paragraph and table handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLog(Vec<SinkCall>);

impl ParagraphSink for CallLog {
    fn add_run(&mut self, text: &str, bold: bool, italic: bool) -> Result<()> {
        self.0.push(SinkCall::AddRun {
            text: text.to_string(),
            bold,
            italic,
        });
        Ok(())
    }
}

impl TableSink for CallLog {
    fn set_cell(&mut self, row: usize, col: usize, text: &str, is_header_row: bool) -> Result<()> {
        self.0.push(SinkCall::SetCell {
            row,
            col,
            text: text.to_string(),
            is_header_row,
        });
        Ok(())
    }
}

/// Sink that stores calls instead of building a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    log: CallLog,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[SinkCall] {
        &self.log.0
    }

    /// Rebuild the operation sequence from the recorded calls.
    ///
    /// `Save` calls are ignored.
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::new();
        for call in self.calls() {
            match call {
                SinkCall::AddHeading { text, level } => ops.push(Operation::heading(text, *level)),
                SinkCall::AddParagraph => ops.push(Operation::spacer()),
                SinkCall::AddRun { text, bold, italic } => {
                    if let Some(Operation::Paragraph { runs }) = ops.last_mut() {
                        runs.push(StyledRun::new(text, *bold, *italic));
                    }
                }
                SinkCall::AddTable { rows, cols } => {
                    ops.push(Operation::table(TableGrid {
                        rows: vec![vec![String::new(); *cols]; *rows],
                    }));
                }
                SinkCall::SetCell { row, col, text, .. } => {
                    if let Some(Operation::Table { grid }) = ops.last_mut() {
                        if let Some(cell) = grid.rows.get_mut(*row).and_then(|r| r.get_mut(*col)) {
                            cell.clone_from(text);
                        }
                    }
                }
                SinkCall::AddPageBreak => ops.push(Operation::PageBreak),
                SinkCall::Save { .. } => {}
            }
        }
        ops
    }
}

impl DocumentSink for RecordingSink {
    type Paragraph = CallLog;
    type Table = CallLog;

    fn add_heading(&mut self, text: &str, level: u8) -> Result<()> {
        self.log.0.push(SinkCall::AddHeading {
            text: text.to_string(),
            level,
        });
        Ok(())
    }

    fn add_paragraph(&mut self) -> Result<&mut CallLog> {
        self.log.0.push(SinkCall::AddParagraph);
        Ok(&mut self.log)
    }

    fn add_table(&mut self, rows: usize, cols: usize) -> Result<&mut CallLog> {
        self.log.0.push(SinkCall::AddTable { rows, cols });
        Ok(&mut self.log)
    }

    fn add_page_break(&mut self) -> Result<()> {
        self.log.0.push(SinkCall::AddPageBreak);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        self.log.0.push(SinkCall::Save {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::apply_all;

    #[test]
    fn test_operations_roundtrip() {
        let ops = vec![
            Operation::heading("Intro", 1),
            Operation::paragraph(vec![StyledRun::plain("x "), StyledRun::bold("y")]),
            Operation::table(TableGrid::from_rows([["A", "B"], ["1", "2"]])),
            Operation::spacer(),
            Operation::PageBreak,
        ];
        let mut sink = RecordingSink::new();
        apply_all(&mut sink, ops.clone()).unwrap();
        sink.save(Path::new("out.docx")).unwrap();

        assert_eq!(sink.operations(), ops);
        assert!(matches!(sink.calls().last(), Some(SinkCall::Save { .. })));
    }
}
