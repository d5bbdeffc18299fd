use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::DashboardError;
use crate::excel::{Cell, CellType, DataTypeInfo, Sheet};
use crate::rows::excel_date_to_iso_string;

/// An open workbook. Only the sheet names are read up front; sheets are parsed
/// on demand with [`Workbook::load_sheet`].
pub struct Workbook {
    reader: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook, DashboardError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DashboardError::WorkbookNotFound(path.to_path_buf()));
    }

    let reader = open_workbook_auto(path)?;
    let sheet_names = reader.sheet_names().to_vec();

    debug!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

    Ok(Workbook {
        reader,
        sheet_names,
    })
}

impl Workbook {
    /// Sheet names in the order the workbook stores them.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn load_sheet(&mut self, name: &str) -> Result<Sheet, DashboardError> {
        let range = self.reader.worksheet_range(name)?;
        Ok(create_sheet_from_range(name, range))
    }
}

fn create_sheet_from_range(name: &str, range: Range<Data>) -> Sheet {
    let (height, width) = range.get_size();

    // 1-based grid, so row 0 and column 0 stay empty
    let mut data = vec![vec![Cell::empty(); width + 1]; height + 1];

    for (row_idx, col_idx, cell) in range.used_cells() {
        let (value, cell_type, original_type) = match cell {
            Data::Empty => (String::new(), CellType::Empty, DataTypeInfo::Empty),

            Data::String(s) => (s.clone(), CellType::Text, DataTypeInfo::String),

            Data::Float(f) => {
                let value = if *f == (*f as i64) as f64 && f.abs() < 1e10 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                };
                (value, CellType::Number, DataTypeInfo::Float(*f))
            }

            Data::Int(i) => (i.to_string(), CellType::Number, DataTypeInfo::Int(*i)),

            Data::Bool(b) => (
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                },
                CellType::Boolean,
                DataTypeInfo::Bool(*b),
            ),

            Data::Error(e) => (format!("Error: {e:?}"), CellType::Text, DataTypeInfo::Error),

            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                (
                    excel_date_to_iso_string(serial),
                    CellType::Date,
                    DataTypeInfo::DateTime(serial),
                )
            }

            Data::DateTimeIso(s) => (
                s.clone(),
                CellType::Date,
                DataTypeInfo::DateTimeIso(s.clone()),
            ),

            Data::DurationIso(s) => (
                s.clone(),
                CellType::Text,
                DataTypeInfo::DurationIso(s.clone()),
            ),
        };

        data[row_idx + 1][col_idx + 1] = Cell::new_with_type(value, cell_type, Some(original_type));
    }

    Sheet {
        name: name.to_string(),
        data,
        max_rows: height,
        max_cols: width,
    }
}
