//! Pipe-table parsing.

use super::classify::SEPARATOR_MARKER;
use super::ParseWarning;
use crate::model::TableGrid;

/// A parsed table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    /// Normalized grid, header first
    pub grid: TableGrid,

    /// Number of input lines consumed, separator rows included
    pub consumed: usize,

    /// Rows that were padded or truncated
    pub warnings: Vec<ParseWarning>,
}

/// Split a table line into trimmed cells.
///
/// The first and last `|`-separated fields are the empty edges outside the
/// outer pipes and are dropped.
pub fn split_row(line: &str) -> Vec<String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|f| f.trim().to_string())
        .collect()
}

/// Check if a line is the alignment row under the header.
pub fn is_separator_row(line: &str) -> bool {
    line.trim().starts_with(SEPARATOR_MARKER)
}

/// Parse the table starting at `lines[start]`.
///
/// Consumes every following line containing `|`, skipping separator rows,
/// and stops at the first line without one. Rows whose width differs from
/// the header are padded with empty cells or truncated.
///
/// `first_line_number` is the 1-indexed source line of `lines[start]`, used
/// in warnings.
pub fn parse_table<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    first_line_number: usize,
) -> TableBlock {
    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    let mut idx = start;

    while let Some(line) = lines.get(idx) {
        let line: &str = line.as_ref();
        if !line.contains('|') {
            break;
        }
        if !is_separator_row(line) {
            rows.push((first_line_number + (idx - start), split_row(line.trim_end())));
        }
        idx += 1;
    }

    let consumed = idx - start;
    let mut rows = rows.into_iter();
    let Some((_, header)) = rows.next() else {
        return TableBlock {
            grid: TableGrid::default(),
            consumed,
            warnings: Vec::new(),
        };
    };

    let width = header.len();
    let mut grid = TableGrid::with_header(header);
    let mut warnings = Vec::new();

    for (line, mut cells) in rows {
        if cells.len() != width {
            log::warn!(
                "Table row on line {} has {} cells, header has {}",
                line,
                cells.len(),
                width
            );
            warnings.push(ParseWarning::MalformedTableRow {
                line,
                expected: width,
                found: cells.len(),
            });
            cells.resize(width, String::new());
        }
        grid.add_row(cells);
    }

    TableBlock {
        grid,
        consumed,
        warnings,
    }
}
