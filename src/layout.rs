use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rows::{LAYOUT_COLUMN, Row, display_value};

/// Longest side of the preview box, in display units.
pub const PREVIEW_MAX_SIDE: f64 = 500.0;

/// Delivery requirements that are the same for every layout.
const DELIVERY_SPECS: [(&str, &str); 9] = [
    ("Frame rate", "30 frames per second"),
    ("Video Format", "MP4"),
    ("Codec", "(High profile, level 5.2, VBR)"),
    ("Field order", "Progressive"),
    ("Pixel Aspect Ratio", "1:1 Square Pixel"),
    ("Bit Rate", "10 mbps or higher"),
    ("Duration", "Unlimited"),
    ("Audio", "None"),
    (
        "Loop",
        "None (please do not loop video because player will loop it seamlessly)",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDetail {
    pub layout: Row,
    pub specifications: Vec<Specification>,
    pub preview: Preview,
}

impl LayoutDetail {
    pub fn from_row(layout: Row) -> Self {
        let specifications = specification_rows(&layout);
        let preview = preview_dimensions(&layout);
        Self {
            layout,
            specifications,
            preview,
        }
    }

    pub fn name(&self) -> String {
        layout_name(&self.layout)
    }
}

pub fn layout_name(row: &Row) -> String {
    row.get(LAYOUT_COLUMN)
        .map(|value| display_value(value).into_owned())
        .unwrap_or_default()
}

/// Finds a layout by name, ignoring case.
pub fn find_layout<'a>(rows: &'a [Row], name: &str) -> Option<&'a Row> {
    let wanted = name.trim().to_lowercase();
    rows.iter()
        .find(|row| layout_name(row).to_lowercase() == wanted)
}

fn pixels(row: &Row, column: &str) -> String {
    let text = row
        .get(column)
        .map(|value| display_value(value).into_owned())
        .filter(|text| !text.is_empty() && text != "0")
        .unwrap_or_else(|| "0".to_string());
    format!("{text} pixels")
}

pub fn specification_rows(layout: &Row) -> Vec<Specification> {
    let mut rows = vec![
        Specification {
            label: "Layout".to_string(),
            value: layout_name(layout),
        },
        Specification {
            label: "Width".to_string(),
            value: pixels(layout, "Width"),
        },
        Specification {
            label: "Height".to_string(),
            value: pixels(layout, "Height"),
        },
        Specification {
            label: "Canvas Width".to_string(),
            value: pixels(layout, "Canvas width"),
        },
        Specification {
            label: "Canvas Height".to_string(),
            value: pixels(layout, "Canvas height"),
        },
    ];

    rows.extend(DELIVERY_SPECS.iter().map(|(label, value)| Specification {
        label: label.to_string(),
        value: value.to_string(),
    }));

    rows
}

fn positive_number(row: &Row, column: &str) -> Option<f64> {
    let number = match row.get(column)? {
        Value::Number(n) => n.as_f64()?,
        other => display_value(other).trim().parse::<f64>().ok()?,
    };
    (number > 0.0).then_some(number)
}

/// Scales the layout's pixel size into a box whose long side is at most
/// [`PREVIEW_MAX_SIDE`]. Unreadable sizes fall back to a 1080x1920 portrait.
pub fn preview_dimensions(layout: &Row) -> Preview {
    let width = positive_number(layout, "Width").unwrap_or(1080.0);
    let height = positive_number(layout, "Height").unwrap_or(1920.0);
    let ratio = width / height;

    if height > width {
        let height = height.min(PREVIEW_MAX_SIDE);
        Preview {
            width: height * ratio,
            height,
        }
    } else {
        let width = width.min(PREVIEW_MAX_SIDE);
        Preview {
            width,
            height: width / ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn finds_layout_ignoring_case() {
        let rows = vec![
            layout(&[("Layout", json!("CA_DM801"))]),
            layout(&[("Layout", json!("CB_DM504"))]),
        ];
        assert_eq!(find_layout(&rows, "cb_dm504"), Some(&rows[1]));
        assert_eq!(find_layout(&rows, "missing"), None);
    }

    #[test]
    fn specification_rows_report_pixel_sizes() {
        let row = layout(&[
            ("Layout", json!("CA_DM801")),
            ("Width", json!(1920)),
            ("Height", json!(1080)),
            ("Canvas width", json!(3840)),
        ]);

        let specs = specification_rows(&row);
        let value = |label: &str| {
            specs
                .iter()
                .find(|s| s.label == label)
                .map(|s| s.value.clone())
                .unwrap()
        };

        assert_eq!(value("Layout"), "CA_DM801");
        assert_eq!(value("Width"), "1920 pixels");
        assert_eq!(value("Canvas Width"), "3840 pixels");
        assert_eq!(value("Canvas Height"), "0 pixels");
        assert_eq!(value("Video Format"), "MP4");
        assert_eq!(specs.len(), 14);
    }

    #[test]
    fn landscape_preview_is_capped_by_width() {
        let row = layout(&[("Width", json!(1920)), ("Height", json!(1080))]);
        let preview = preview_dimensions(&row);
        assert_eq!(preview.width, 500.0);
        assert!((preview.height - 281.25).abs() < 1e-9);
    }

    #[test]
    fn portrait_preview_is_capped_by_height() {
        let row = layout(&[("Width", json!("1080")), ("Height", json!("1920"))]);
        let preview = preview_dimensions(&row);
        assert_eq!(preview.height, 500.0);
        assert!((preview.width - 281.25).abs() < 1e-9);
    }

    #[test]
    fn unreadable_size_falls_back_to_portrait_default() {
        let row = layout(&[("Width", json!("N/A"))]);
        let preview = preview_dimensions(&row);
        assert_eq!(preview.height, 500.0);
        assert!(preview.width < preview.height);
    }

    #[test]
    fn small_layouts_are_not_scaled_up() {
        let row = layout(&[("Width", json!(320)), ("Height", json!(240))]);
        assert_eq!(
            preview_dimensions(&row),
            Preview {
                width: 320.0,
                height: 240.0
            }
        );
    }
}
