use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;

/// One spreadsheet line keyed by column header, in header order.
pub type Row = IndexMap<String, Value>;

pub type Rows = Vec<Row>;

/// A header name paired with the 1-based grid column it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// The text a cell shows when rendered or searched. Absent and null values
/// render as the empty string.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

pub fn cell_text<'a>(row: &'a Row, column: &str) -> Cow<'a, str> {
    row.get(column).map_or(Cow::Borrowed(""), display_value)
}
