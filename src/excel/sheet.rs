use crate::excel::Cell;

/// A single worksheet held as a 1-based grid: `data[0]` and column 0 of every
/// row are padding so that `data[row][col]` matches spreadsheet coordinates.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub name: String,
    pub data: Vec<Vec<Cell>>,
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Sheet {
    /// Builds a sheet from rows of display text. Mostly useful for tests and
    /// for callers that already hold plain values.
    pub fn from_rows<S: AsRef<str>>(name: &str, rows: &[Vec<S>]) -> Self {
        let max_rows = rows.len();
        let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut data = vec![vec![Cell::empty(); max_cols + 1]; max_rows + 1];
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                let value = value.as_ref();
                if !value.is_empty() {
                    data[row_idx + 1][col_idx + 1] = Cell::new(value.to_string());
                }
            }
        }

        Self {
            name: name.to_string(),
            data,
            max_rows,
            max_cols,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.data.get(row).and_then(|cells| cells.get(col))
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        (1..=self.max_cols).all(|col| self.cell(row, col).is_none_or(Cell::is_empty))
    }
}
