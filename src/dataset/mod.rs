//! Logical datasets served by the dashboard and the per-request pipeline that
//! turns one workbook sheet into normalised rows.

mod catalog;
mod locator;

pub use catalog::{DATASETS, Dataset, DatasetSpec, ParseMode, SheetMatch};
pub use locator::{find_sheet, locate_sheet};

use std::path::Path;
use tracing::debug;

use crate::error::DashboardError;
use crate::excel::{Sheet, open_workbook};
use crate::rows::{
    DimensionScope, DimensionSplitter, Rows, rename_layout_column, sheet_to_padded_records,
    sheet_to_records,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub dimension_scope: DimensionScope,
}

/// Opens the workbook, finds the dataset's sheet and returns its rows.
///
/// Nothing is cached: every call re-reads the file from disk.
pub fn load_rows(
    workbook_path: &Path,
    dataset: Dataset,
    options: NormalizeOptions,
) -> Result<Rows, DashboardError> {
    let mut workbook = open_workbook(workbook_path)?;
    let sheet_name = find_sheet(dataset, workbook.sheet_names())?;
    let sheet = workbook.load_sheet(&sheet_name)?;

    let rows = normalize_sheet(dataset, &sheet, options)?;

    debug!(
        dataset = %dataset,
        sheet = %sheet_name,
        rows = rows.len(),
        "normalised sheet"
    );

    Ok(rows)
}

/// Applies the dataset's parse mode and post-processing to a loaded sheet.
pub fn normalize_sheet(
    dataset: Dataset,
    sheet: &Sheet,
    options: NormalizeOptions,
) -> Result<Rows, DashboardError> {
    let spec = dataset.spec();

    let mut rows = match spec.parse {
        ParseMode::Records => sheet_to_records(sheet),
        ParseMode::HeaderIndexed => sheet_to_padded_records(sheet)
            .ok_or_else(|| DashboardError::EmptySheet(spec.label.to_string()))?,
    };

    if spec.rename_layout {
        rows.iter_mut().for_each(rename_layout_column);
    }
    if spec.split_dimensions {
        DimensionSplitter::new(options.dimension_scope).split_rows(&mut rows);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn electronics_rows_are_padded_and_renamed() {
        let sheet = Sheet::from_rows(
            "Electronics",
            &[
                vec!["Layout", "Width", "Height"],
                vec!["CA_DM801", "1920", ""],
                vec!["", "", ""],
            ],
        );

        let rows = normalize_sheet(Dataset::Electronics, &sheet, NormalizeOptions::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            ["Layout Name", "Width", "Height"]
        );
        assert_eq!(rows[0]["Height"], json!(""));
    }

    #[test]
    fn empty_electronics_sheet_is_an_error() {
        let sheet = Sheet::from_rows::<&str>("Electronics", &[]);
        assert!(matches!(
            normalize_sheet(Dataset::Electronics, &sheet, NormalizeOptions::default()),
            Err(DashboardError::EmptySheet(label)) if label == "Electronics"
        ));
    }

    #[test]
    fn jcd_rows_get_width_and_height() {
        let sheet = Sheet::from_rows(
            "JCD",
            &[
                vec!["Layout Name", "Dimensions"],
                vec!["Airport wall", "3840 x 1080"],
                vec!["Kiosk", "tbd"],
            ],
        );

        let rows = normalize_sheet(Dataset::Jcd, &sheet, NormalizeOptions::default()).unwrap();
        assert_eq!(rows[0]["Width"], json!("3840"));
        assert_eq!(rows[0]["Height"], json!("1080"));
        assert!(!rows[0].contains_key("Dimensions"));
        assert_eq!(rows[1]["Dimensions"], json!("tbd"));
    }

    #[test]
    fn other_datasets_are_served_verbatim() {
        let sheet = Sheet::from_rows(
            "Vendor List",
            &[vec!["Company", "Size"], vec!["Acme", "1920x1080"]],
        );
        let rows = normalize_sheet(Dataset::VendorList, &sheet, NormalizeOptions::default()).unwrap();
        assert_eq!(rows[0]["Size"], json!("1920x1080"));
    }
}
