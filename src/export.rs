use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook as XlsxWorkbook};
use serde::Serialize;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::layout::LayoutDetail;

const HEADER_FILL: u32 = 0x00C853;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

/// Writes the layout's specification table as a two-column worksheet.
pub fn export_specification_xlsx(detail: &LayoutDetail, path: &Path) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);
    let label_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let value_format = Format::new().set_border(FormatBorder::Thin);

    let sheet_name = sanitize_sheet_name(&detail.name());
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&sheet_name)
        .with_context(|| format!("Invalid worksheet name: {sheet_name}"))?;

    worksheet.set_column_width(0, 22)?;
    worksheet.set_column_width(1, 70)?;

    worksheet.write_string_with_format(0, 0, "Specification", &header_format)?;
    worksheet.write_string_with_format(0, 1, "Value", &header_format)?;

    for (idx, spec) in detail.specifications.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string_with_format(row, 0, &spec.label, &label_format)?;
        worksheet.write_string_with_format(row, 1, &spec.value, &value_format)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

// Worksheet names are limited to 31 characters and a few symbols are reserved.
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim().to_string();

    if cleaned.is_empty() {
        "Specification".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::open_workbook;
    use crate::rows::Row;
    use serde_json::json;

    fn detail() -> LayoutDetail {
        let mut row = Row::new();
        row.insert("Layout".to_string(), json!("CA_DM801"));
        row.insert("Width".to_string(), json!(1080));
        row.insert("Height".to_string(), json!(1920));
        LayoutDetail::from_row(row)
    }

    #[test]
    fn sheet_names_drop_reserved_characters() {
        assert_eq!(sanitize_sheet_name("A/B:C"), "ABC");
        assert_eq!(sanitize_sheet_name("[]"), "Specification");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        write_json_to_file(&vec![json!({"a": 1})], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!([{"a": 1}]));
    }

    #[test]
    fn specification_workbook_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.xlsx");
        export_specification_xlsx(&detail(), &path).unwrap();

        let mut workbook = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), &["CA_DM801".to_string()]);

        let sheet = workbook.load_sheet("CA_DM801").unwrap();
        assert_eq!(sheet.cell(1, 1).unwrap().value, "Specification");
        assert_eq!(sheet.cell(2, 2).unwrap().value, "CA_DM801");
        assert_eq!(sheet.cell(3, 2).unwrap().value, "1080 pixels");
    }
}
