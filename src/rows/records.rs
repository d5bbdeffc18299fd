use serde_json::Value;

use crate::excel::Sheet;
use crate::rows::converters::process_cell_value;
use crate::rows::headers::{header_row_index, infer_headers};
use crate::rows::types::{Row, Rows};

/// Header-keyed records: one row per non-blank grid line below the header,
/// with blank cells left out of the row entirely.
pub fn sheet_to_records(sheet: &Sheet) -> Rows {
    let Some(header_row) = header_row_index(sheet) else {
        return Vec::new();
    };
    let headers = infer_headers(sheet);

    let row_count = sheet.max_rows.saturating_sub(header_row);
    let mut records = Vec::with_capacity(row_count);

    for row_idx in (header_row + 1)..=sheet.max_rows {
        let mut row = Row::with_capacity(headers.len());

        for column in &headers {
            let Some(cell) = sheet.cell(row_idx, column.index) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }

            let value = process_cell_value(cell);
            if !value.is_null() {
                row.insert(column.name.clone(), value);
            }
        }

        if !row.is_empty() {
            records.push(row);
        }
    }

    records
}

/// Header-indexed records: every header is present in every row, blank cells
/// read as `""`, and rows where every value is `""` are dropped.
///
/// Zero and `false` cells also read as `""`.
///
/// Returns `None` when the sheet has no lines at all, which callers report as
/// an empty sheet.
pub fn sheet_to_padded_records(sheet: &Sheet) -> Option<Rows> {
    let header_row = header_row_index(sheet)?;
    let headers = infer_headers(sheet);

    let mut records = Vec::with_capacity(sheet.max_rows.saturating_sub(header_row));

    for row_idx in (header_row + 1)..=sheet.max_rows {
        let row: Row = headers
            .iter()
            .map(|column| {
                let value = sheet
                    .cell(row_idx, column.index)
                    .filter(|cell| !cell.is_empty())
                    .map(process_cell_value)
                    .unwrap_or(Value::Null);
                let value = if is_falsy(&value) {
                    Value::String(String::new())
                } else {
                    value
                };
                (column.name.clone(), value)
            })
            .collect();

        let all_blank = row
            .values()
            .all(|value| matches!(value, Value::String(s) if s.is_empty()));
        if !all_blank {
            records.push(row);
        }
    }

    Some(records)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_omit_blank_cells_and_rows() {
        let sheet = Sheet::from_rows(
            "Categories",
            &[
                vec!["Category", "Count", "Notes"],
                vec!["Retail", "12", ""],
                vec!["", "", ""],
                vec!["Transport", "", "Airport"],
            ],
        );

        let rows = sheet_to_records(&sheet);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Category"), Some(&json!("Retail")));
        assert_eq!(rows[0].get("Count"), Some(&json!(12)));
        assert!(!rows[0].contains_key("Notes"));
        assert_eq!(
            rows[1].keys().collect::<Vec<_>>(),
            ["Category", "Notes"]
        );
    }

    #[test]
    fn records_keep_header_order() {
        let sheet = Sheet::from_rows(
            "Vendor List",
            &[
                vec!["Company", "Brand", "Country/City"],
                vec!["Acme", "X", "UAE"],
            ],
        );
        let rows = sheet_to_records(&sheet);
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[{"Company":"Acme","Brand":"X","Country/City":"UAE"}]"#);
    }

    #[test]
    fn header_only_sheet_has_no_records() {
        let sheet = Sheet::from_rows("JCD", &[vec!["Layout Name", "Size"]]);
        assert!(sheet_to_records(&sheet).is_empty());
    }

    #[test]
    fn padded_records_fill_blanks_with_empty_strings() {
        let sheet = Sheet::from_rows(
            "Electronics",
            &[
                vec!["Layout", "Width", "Height"],
                vec!["CA_DM801", "1920", ""],
                vec!["", "", ""],
            ],
        );

        let rows = sheet_to_padded_records(&sheet).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Width"), Some(&json!(1920)));
        assert_eq!(rows[0].get("Height"), Some(&json!("")));
    }

    #[test]
    fn padded_records_blank_out_zero_and_false() {
        let sheet = Sheet::from_rows(
            "Electronics",
            &[
                vec!["Layout", "Offset", "Active", "Units"],
                vec!["A", "0", "FALSE", "3"],
                vec!["", "0", "", ""],
            ],
        );
        let rows = sheet_to_padded_records(&sheet).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Offset"), Some(&json!("")));
        assert_eq!(rows[0].get("Active"), Some(&json!("")));
        assert_eq!(rows[0].get("Units"), Some(&json!(3)));
    }

    #[test]
    fn padded_records_report_sheet_without_lines() {
        let sheet = Sheet::from_rows::<&str>("Electronics", &[]);
        assert!(sheet_to_padded_records(&sheet).is_none());
    }
}
