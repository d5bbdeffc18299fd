use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;

use crate::rows::{Row, cell_text, display_value};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Every cell of the row.
    #[default]
    All,
    /// Only the named columns.
    Columns(Vec<String>),
}

/// Case-insensitive substring search. A blank query matches everything.
pub fn matches_search(row: &Row, query: &str, scope: &SearchScope) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    match scope {
        SearchScope::All => row
            .values()
            .filter(|value| !value.is_null())
            .any(|value| display_value(value).to_lowercase().contains(&needle)),
        SearchScope::Columns(columns) => columns
            .iter()
            .any(|column| cell_text(row, column).to_lowercase().contains(&needle)),
    }
}

/// Sorted distinct non-empty display values of a column.
pub fn distinct_values(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter()
        .map(|row| cell_text(row, column).into_owned())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-column multi-select filters. Values selected within one column are
/// alternatives; columns are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ColumnFilters {
    selected: IndexMap<String, Vec<String>>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, column: &str, value: &str) {
        let values = self.selected.entry(column.to_string()).or_default();
        match values.iter().position(|v| v == value) {
            Some(idx) => {
                values.remove(idx);
            }
            None => values.push(value.to_string()),
        }
    }

    pub fn select_all(&mut self, column: &str, values: Vec<String>) {
        self.selected.insert(column.to_string(), values);
    }

    pub fn clear(&mut self, column: &str) {
        self.selected.shift_remove(column);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self, column: &str) -> &[String] {
        self.selected.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_active(&self, column: &str) -> bool {
        !self.selected(column).is_empty()
    }

    /// Columns with at least one selected value, in the order they were first filtered.
    pub fn active(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selected
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(column, values)| (column.as_str(), values.as_slice()))
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.active().all(|(column, values)| {
            let text = cell_text(row, column);
            values.iter().any(|value| *value == text)
        })
    }
}

/// Business columns that get a single-select dropdown in the vendor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusinessField {
    Company,
    Brand,
    Country,
    Location,
    Zone,
}

impl BusinessField {
    pub const ALL: [BusinessField; 5] = [
        BusinessField::Company,
        BusinessField::Brand,
        BusinessField::Country,
        BusinessField::Location,
        BusinessField::Zone,
    ];

    /// Header substrings tried in priority order.
    pub fn terms(self) -> &'static [&'static str] {
        match self {
            BusinessField::Company => &["company"],
            BusinessField::Brand => &["brand"],
            BusinessField::Country => &["country/city", "country", "city"],
            BusinessField::Location => &["location"],
            BusinessField::Zone => &["zone"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BusinessField::Company => "Company",
            BusinessField::Brand => "Brand",
            BusinessField::Country => "Country",
            BusinessField::Location => "Location",
            BusinessField::Zone => "Zone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.label().to_lowercase() == name)
    }
}

impl fmt::Display for BusinessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First header whose lowercase form contains a term, trying terms in order.
pub fn resolve_column<'a>(headers: &'a [String], terms: &[&str]) -> Option<&'a str> {
    terms.iter().find_map(|term| {
        let term = term.to_lowercase();
        headers
            .iter()
            .find(|header| header.to_lowercase().contains(&term))
            .map(String::as_str)
    })
}

/// Single-select filters over business columns; an unset field means "all".
#[derive(Debug, Clone, Default)]
pub struct DropdownFilters {
    selected: BTreeMap<BusinessField, String>,
}

impl DropdownFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: BusinessField, value: Option<String>) {
        match value {
            Some(value) if !value.eq_ignore_ascii_case("all") => {
                self.selected.insert(field, value);
            }
            _ => {
                self.selected.remove(&field);
            }
        }
    }

    pub fn get(&self, field: BusinessField) -> Option<&str> {
        self.selected.get(&field).map(String::as_str)
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn active(&self) -> impl Iterator<Item = (BusinessField, &str)> {
        self.selected
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Selections whose field has no matching header are ignored.
    pub fn matches(&self, row: &Row, headers: &[String]) -> bool {
        self.active().all(|(field, value)| {
            match resolve_column(headers, field.terms()) {
                Some(column) => cell_text(row, column) == value,
                None => true,
            }
        })
    }
}
