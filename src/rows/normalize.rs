use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::rows::types::{Row, display_value};

pub const LAYOUT_COLUMN: &str = "Layout";
pub const LAYOUT_NAME_COLUMN: &str = "Layout Name";
pub const WIDTH_COLUMN: &str = "Width";
pub const HEIGHT_COLUMN: &str = "Height";

static DIMENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*[xX×]\s*([0-9]+)").expect("dimension pattern"));

/// Renames a `Layout` column to `Layout Name`, keeping its value and position.
pub fn rename_layout_column(row: &mut Row) {
    let Some(index) = row.get_index_of(LAYOUT_COLUMN) else {
        return;
    };
    if row.contains_key(LAYOUT_NAME_COLUMN) {
        return;
    }
    if let Some((_, value)) = row.shift_remove_index(index) {
        row.shift_insert(index, LAYOUT_NAME_COLUMN.to_string(), value);
    }
}

/// Extracts `(width, height)` from the first `<digits> x <digits>` run in `text`.
pub fn parse_dimensions(text: &str) -> Option<(String, String)> {
    let captures = DIMENSION_PATTERN.captures(text)?;
    Some((
        captures[1].trim().to_string(),
        captures[2].trim().to_string(),
    ))
}

/// Whether a header names a combined dimension column.
pub fn is_dimension_header(header: &str) -> bool {
    let lower = header.to_lowercase();
    (lower.contains("width") && lower.contains("height"))
        || lower.contains("dimension")
        || lower == "size"
}

/// Which rules may flag a column as holding a combined `WxH` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionScope {
    /// Header rules or any value that looks like `WxH`.
    #[default]
    Both,
    /// Only columns whose header names a dimension.
    Header,
    /// Only columns whose value looks like `WxH`.
    Value,
    Off,
}

impl FromStr for DimensionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(DimensionScope::Both),
            "header" | "headers" => Ok(DimensionScope::Header),
            "value" | "values" => Ok(DimensionScope::Value),
            "off" | "none" => Ok(DimensionScope::Off),
            other => Err(format!("unknown dimension match: {other}")),
        }
    }
}

/// Splits combined dimension strings such as `1920x1080` into `Width` and
/// `Height` columns. Each row is handled on its own, so rows whose dimension
/// lives under different headers still each end up with one pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionSplitter {
    scope: DimensionScope,
}

impl DimensionSplitter {
    pub fn new(scope: DimensionScope) -> Self {
        Self { scope }
    }

    pub fn is_dimension_column(&self, header: &str, text: &str) -> bool {
        match self.scope {
            DimensionScope::Both => {
                is_dimension_header(header) || DIMENSION_PATTERN.is_match(text)
            }
            DimensionScope::Header => is_dimension_header(header),
            DimensionScope::Value => DIMENSION_PATTERN.is_match(text),
            DimensionScope::Off => false,
        }
    }

    pub fn split_row(&self, row: &mut Row) {
        if self.scope == DimensionScope::Off {
            return;
        }

        // Sources are read from the row as it came in, not as it is rewritten.
        let original = row.clone();
        for (header, value) in &original {
            let text = display_value(value).into_owned();

            if !self.is_dimension_column(header, &text) {
                continue;
            }
            let Some((width, height)) = parse_dimensions(&text) else {
                continue;
            };

            replace_with_dimensions(row, header, width, height);
        }
    }

    pub fn split_rows(&self, rows: &mut [Row]) {
        for row in rows {
            self.split_row(row);
        }
    }
}

fn replace_with_dimensions(row: &mut Row, source: &str, width: String, height: String) {
    let pair = [
        (WIDTH_COLUMN, Value::String(width)),
        (HEIGHT_COLUMN, Value::String(height)),
    ];

    if source == WIDTH_COLUMN || source == HEIGHT_COLUMN {
        for (name, value) in pair {
            row.insert(name.to_string(), value);
        }
        return;
    }

    let Some((mut index, _, _)) = row.shift_remove_full(source) else {
        return;
    };
    for (name, value) in pair {
        if let Some(existing) = row.get_mut(name) {
            *existing = value;
        } else {
            row.shift_insert(index, name.to_string(), value);
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn layout_column_is_renamed_in_place() {
        let mut r = row(&[
            ("Layout", json!("CA_DM801")),
            ("Width", json!(1920)),
        ]);
        rename_layout_column(&mut r);
        assert_eq!(r.keys().collect::<Vec<_>>(), ["Layout Name", "Width"]);
        assert_eq!(r["Layout Name"], json!("CA_DM801"));
    }

    #[test]
    fn rows_without_layout_are_untouched() {
        let mut r = row(&[("Name", json!("x"))]);
        rename_layout_column(&mut r);
        assert_eq!(r.keys().collect::<Vec<_>>(), ["Name"]);
    }

    #[test]
    fn splits_every_separator_variant() {
        let splitter = DimensionSplitter::default();
        for text in ["1920x1080", "1920X1080", "1920×1080", "  1920 x 1080  "] {
            let mut r = row(&[("Layout Name", json!("A")), ("Resolution", json!(text))]);
            splitter.split_row(&mut r);
            assert_eq!(r.get("Width"), Some(&json!("1920")), "{text}");
            assert_eq!(r.get("Height"), Some(&json!("1080")), "{text}");
            assert!(!r.contains_key("Resolution"), "{text}");
        }
    }

    #[test]
    fn dimension_pair_takes_the_source_position() {
        let splitter = DimensionSplitter::default();
        let mut r = row(&[
            ("Layout Name", json!("A")),
            ("Size", json!("1080x1920")),
            ("Venue", json!("Mall")),
        ]);
        splitter.split_row(&mut r);
        assert_eq!(
            r.keys().collect::<Vec<_>>(),
            ["Layout Name", "Width", "Height", "Venue"]
        );
    }

    #[test]
    fn non_dimension_text_is_left_alone() {
        let splitter = DimensionSplitter::default();
        let mut r = row(&[("Size", json!("abc"))]);
        splitter.split_row(&mut r);
        assert_eq!(r, row(&[("Size", json!("abc"))]));
    }

    #[test]
    fn header_scope_ignores_value_only_matches() {
        let splitter = DimensionSplitter::new(DimensionScope::Header);
        let mut r = row(&[("Notes", json!("ships 2x4 panels")), ("Dimensions", json!("800 x 600"))]);
        splitter.split_row(&mut r);
        assert_eq!(r.get("Notes"), Some(&json!("ships 2x4 panels")));
        assert_eq!(r.get("Width"), Some(&json!("800")));
        assert_eq!(r.get("Height"), Some(&json!("600")));
    }

    #[test]
    fn value_scope_ignores_header_names() {
        let splitter = DimensionSplitter::new(DimensionScope::Value);
        assert!(!splitter.is_dimension_column("Size", "large"));
        assert!(splitter.is_dimension_column("Notes", "2x4"));
    }

    #[test]
    fn off_scope_disables_splitting() {
        let splitter = DimensionSplitter::new(DimensionScope::Off);
        let mut r = row(&[("Size", json!("1920x1080"))]);
        splitter.split_row(&mut r);
        assert!(r.contains_key("Size"));
    }

    #[test]
    fn width_source_column_is_kept() {
        let splitter = DimensionSplitter::default();
        let mut r = row(&[("Width", json!("1920x1080"))]);
        splitter.split_row(&mut r);
        assert_eq!(r.get("Width"), Some(&json!("1920")));
        assert_eq!(r.get("Height"), Some(&json!("1080")));
    }

    #[test]
    fn later_sources_read_the_incoming_values() {
        let splitter = DimensionSplitter::default();
        let mut r = row(&[
            ("Size", json!("1920x1080")),
            ("Width", json!("800x600")),
        ]);
        splitter.split_row(&mut r);
        assert_eq!(r.get("Width"), Some(&json!("800")));
        assert_eq!(r.get("Height"), Some(&json!("600")));
    }

    #[test]
    fn header_rules_match_combined_names() {
        assert!(is_dimension_header("Width x Height"));
        assert!(is_dimension_header("Screen Dimensions"));
        assert!(is_dimension_header("SIZE"));
        assert!(!is_dimension_header("Width"));
        assert!(!is_dimension_header("Size (inch)"));
    }

    #[test]
    fn parses_scope_names() {
        assert_eq!("HEADER".parse::<DimensionScope>(), Ok(DimensionScope::Header));
        assert!("sideways".parse::<DimensionScope>().is_err());
    }
}
