//! Table grid type.

use serde::{Deserialize, Serialize};

/// A rectangular grid of cell strings. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows in the table, header first
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a grid with a header row.
    pub fn with_header(header: Vec<String>) -> Self {
        Self { rows: vec![header] }
    }

    /// Create a grid from string rows.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Check that every row has the header's cell count.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = TableGrid::from_rows([["A", "B"], ["1", "2"], ["3", "4"]]);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.header().unwrap(), ["A", "B"]);
        assert_eq!(grid.body().len(), 2);
        assert!(grid.is_rectangular());
    }

    #[test]
    fn test_empty_grid() {
        let grid = TableGrid::default();
        assert!(grid.is_empty());
        assert_eq!(grid.column_count(), 0);
        assert!(grid.header().is_none());
        assert!(grid.body().is_empty());
    }

    #[test]
    fn test_plain_text() {
        let grid = TableGrid::from_rows([["A", "B"], ["1", "2"]]);
        assert_eq!(grid.plain_text(), "A\tB\n1\t2");
    }
}
