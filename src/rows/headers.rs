use std::collections::HashSet;

use crate::excel::Sheet;
use crate::rows::types::Column;

/// Name given to a header cell that is blank; repeats get `_1`, `_2`, ...
pub const EMPTY_HEADER: &str = "__EMPTY";

/// The first non-empty grid row, which holds the column headers.
pub fn header_row_index(sheet: &Sheet) -> Option<usize> {
    (1..=sheet.max_rows).find(|&row| !sheet.is_row_empty(row))
}

/// Reads the header row into an ordered column list.
///
/// Every column up to the last one holding any value is kept. Blank header
/// cells become `__EMPTY`, `__EMPTY_1`, ... and duplicate names are suffixed
/// with `_1`, `_2`, ... so every column keeps a distinct key.
pub fn infer_headers(sheet: &Sheet) -> Vec<Column> {
    let Some(header_row) = header_row_index(sheet) else {
        return Vec::new();
    };

    let last_used = (1..=sheet.max_cols).rev().find(|&col| {
        (header_row..=sheet.max_rows).any(|row| sheet.cell(row, col).is_some_and(|c| !c.is_empty()))
    });
    let Some(last_used) = last_used else {
        return Vec::new();
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(last_used);

    for col_idx in 1..=last_used {
        let raw = sheet
            .cell(header_row, col_idx)
            .map(|cell| cell.value.trim().to_string())
            .unwrap_or_default();
        let base = if raw.is_empty() {
            EMPTY_HEADER.to_string()
        } else {
            raw
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());

        columns.push(Column {
            index: col_idx,
            name,
        });
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn uses_first_row_as_header() {
        let sheet = Sheet::from_rows(
            "Vendor List",
            &[vec!["Company", "Brand", "Country/City"], vec!["Acme", "X", "UAE"]],
        );
        let columns = infer_headers(&sheet);
        assert_eq!(names(&columns), ["Company", "Brand", "Country/City"]);
        assert_eq!(columns[2].index, 3);
    }

    #[test]
    fn skips_leading_blank_rows() {
        let sheet = Sheet::from_rows("DDF", &[vec!["", ""], vec!["Layout", "Width"]]);
        assert_eq!(header_row_index(&sheet), Some(2));
        assert_eq!(names(&infer_headers(&sheet)), ["Layout", "Width"]);
    }

    #[test]
    fn names_blank_and_duplicate_headers() {
        let sheet = Sheet::from_rows(
            "Vendor List",
            &[vec!["Company", "", "Zone", "", "Zone"], vec!["Acme", "a", "b", "c", "d"]],
        );
        assert_eq!(
            names(&infer_headers(&sheet)),
            ["Company", "__EMPTY", "Zone", "__EMPTY_1", "Zone_1"]
        );
    }

    #[test]
    fn unnamed_columns_with_data_are_kept() {
        let sheet = Sheet::from_rows("JCD", &[vec!["Size", "", ""], vec!["1x2", "", "x"]]);
        assert_eq!(names(&infer_headers(&sheet)), ["Size", "__EMPTY", "__EMPTY_1"]);
    }

    #[test]
    fn unused_trailing_columns_are_dropped() {
        let sheet = Sheet::from_rows("JCD", &[vec!["Size", ""], vec!["1x2", ""]]);
        assert_eq!(names(&infer_headers(&sheet)), ["Size"]);
    }

    #[test]
    fn empty_sheet_has_no_headers() {
        let sheet = Sheet::from_rows::<&str>("Empty", &[]);
        assert!(infer_headers(&sheet).is_empty());
    }
}
