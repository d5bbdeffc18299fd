use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::rows::{Row, display_value};

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("float prefix pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Shown next to sortable headers that are not the active sort column.
pub const UNSORTED_INDICATOR: &str = "↕";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// The sort that results from selecting `column`: the active column flips
    /// direction, any other column starts ascending.
    pub fn request(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column: state.column.clone(),
                direction: state.direction.toggled(),
            },
            _ => SortState::ascending(column),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericParse {
    /// Leading decimal number, like a lenient float parse.
    #[default]
    Float,
    /// Every non-digit character is discarded before parsing.
    DigitsOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingValues {
    /// Missing cells compare as the empty string.
    #[default]
    AsEmpty,
    /// Missing cells go to the bottom in both directions.
    Last,
}

#[derive(Debug, Clone, Default)]
pub struct SortPolicy {
    pub numeric_columns: Vec<String>,
    pub numeric_parse: NumericParse,
    pub missing: MissingValues,
}

impl SortPolicy {
    pub fn is_numeric_column(&self, column: &str) -> bool {
        self.numeric_columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }
}

pub fn parse_leading_float(text: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

pub fn parse_digits(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok()
}

/// Numeric sort key; anything unparsable counts as 0.
pub fn numeric_key(value: Option<&Value>, parse: NumericParse) -> f64 {
    let key = match (value, parse) {
        (Some(Value::Number(n)), NumericParse::Float) => n.as_f64(),
        (Some(value), NumericParse::Float) => parse_leading_float(&display_value(value)),
        (Some(value), NumericParse::DigitsOnly) => parse_digits(&display_value(value)),
        (None, _) => None,
    };
    key.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn string_key(value: Option<&Value>) -> String {
    value
        .map(|v| display_value(v).to_lowercase())
        .unwrap_or_default()
}

/// Ascending comparison of two cells of `column`.
pub fn compare_values(
    a: Option<&Value>,
    b: Option<&Value>,
    column: &str,
    policy: &SortPolicy,
) -> Ordering {
    if policy.is_numeric_column(column) {
        let (a, b) = (
            numeric_key(a, policy.numeric_parse),
            numeric_key(b, policy.numeric_parse),
        );
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }

    if let (Some(Value::Number(a)), Some(Value::Number(b))) = (a, b) {
        if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
    }

    string_key(a).cmp(&string_key(b))
}

fn present<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
    row.get(column).filter(|value| !value.is_null())
}

/// Stable sort of row references under `sort`.
pub fn sort_rows(rows: &mut [&Row], sort: &SortState, policy: &SortPolicy) {
    let column = sort.column.as_str();

    rows.sort_by(|a, b| {
        let (a, b) = (present(a, column), present(b, column));

        if policy.missing == MissingValues::Last {
            match (a, b) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
                _ => {}
            }
        }

        let ordering = compare_values(a, b, column, policy);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
