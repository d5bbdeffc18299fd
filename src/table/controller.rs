use serde_json::Value;

use crate::rows::{Row, Rows, cell_text, display_value, rename_layout_column};
use crate::table::columns::{ColumnVisibility, arrange_columns, infer_columns};
use crate::table::config::TableConfig;
use crate::table::filter::{
    BusinessField, ColumnFilters, DropdownFilters, distinct_values, matches_search,
    resolve_column,
};
use crate::table::sort::{SortState, UNSORTED_INDICATOR, sort_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub data_columns: usize,
    pub visible_columns: usize,
}

/// In-memory state of one tabular view. Rows are fetched once; sorting,
/// filtering and column visibility are recomputed from them on demand.
#[derive(Debug, Clone)]
pub struct TableController {
    config: TableConfig,
    rows: Rows,
    columns: Vec<String>,
    visibility: ColumnVisibility,
    sort: Option<SortState>,
    search: String,
    column_filters: ColumnFilters,
    dropdowns: DropdownFilters,
}

impl TableController {
    pub fn new(config: TableConfig, mut rows: Rows) -> Self {
        if config.rename_layout_column {
            rows.iter_mut().for_each(rename_layout_column);
        }

        let columns = arrange_columns(
            infer_columns(&rows),
            &config.hidden_column_terms,
            &config.leading_column_terms,
        );
        let visibility = ColumnVisibility::with_defaults(&columns, &config.default_columns);
        let sort = config.default_sort.clone();

        Self {
            config,
            rows,
            columns,
            visibility,
            sort,
            search: String::new(),
            column_filters: ColumnFilters::new(),
            dropdowns: DropdownFilters::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every data column, in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn display_columns(&self) -> Vec<&str> {
        self.visibility.visible_in(&self.columns)
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.visibility.is_visible(column)
    }

    /// Case-insensitive lookup of a data column by name.
    pub fn resolve_column_name(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.columns
            .iter()
            .find(|column| column.as_str() == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|column| column.eq_ignore_ascii_case(name))
            })
            .map(String::as_str)
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn request_sort(&mut self, column: &str) {
        self.sort = Some(SortState::request(self.sort.as_ref(), column));
    }

    pub fn sort_indicator(&self, column: &str) -> &'static str {
        match &self.sort {
            Some(sort) if sort.column == column => sort.direction.indicator(),
            _ => UNSORTED_INDICATOR,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Returns the new visibility, or `None` for an unknown column.
    pub fn toggle_column(&mut self, column: &str) -> Option<bool> {
        let column = self.resolve_column_name(column)?.to_string();
        Some(self.visibility.toggle(&column))
    }

    pub fn show_all_columns(&mut self) {
        self.visibility.show_all(&self.columns);
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    pub fn filter_options(&self, column: &str) -> Vec<String> {
        distinct_values(&self.rows, column)
    }

    pub fn toggle_filter_value(&mut self, column: &str, value: &str) {
        self.column_filters.toggle(column, value);
    }

    pub fn select_all_filter(&mut self, column: &str) {
        let values = self.filter_options(column);
        self.column_filters.select_all(column, values);
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.column_filters.clear(column);
    }

    /// Drops the search, every column filter and every dropdown selection.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.column_filters.clear_all();
        self.dropdowns.clear_all();
    }

    pub fn dropdowns(&self) -> &DropdownFilters {
        &self.dropdowns
    }

    pub fn dropdown_column(&self, field: BusinessField) -> Option<&str> {
        resolve_column(&self.columns, field.terms())
    }

    pub fn dropdown_options(&self, field: BusinessField) -> Vec<String> {
        self.dropdown_column(field)
            .map(|column| distinct_values(&self.rows, column))
            .unwrap_or_default()
    }

    pub fn set_dropdown(&mut self, field: BusinessField, value: Option<String>) {
        self.dropdowns.set(field, value);
    }

    fn keeps(&self, row: &Row) -> bool {
        self.dropdowns.matches(row, &self.columns)
            && self.column_filters.matches(row)
            && matches_search(row, &self.search, &self.config.search)
    }

    /// Rows that pass every active filter, in sort order.
    pub fn view(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self.rows.iter().filter(|row| self.keeps(row)).collect();
        if let Some(sort) = &self.sort {
            sort_rows(&mut rows, sort, &self.config.sort_policy);
        }
        rows
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            total_rows: self.rows.len(),
            filtered_rows: self.rows.iter().filter(|row| self.keeps(row)).count(),
            data_columns: self.columns.len(),
            visible_columns: self.display_columns().len(),
        }
    }

    pub fn format_cell(&self, row: &Row, column: &str) -> String {
        match (row.get(column), self.config.decimals_for(column)) {
            (Some(Value::Number(n)), Some(places)) => match n.as_f64() {
                Some(number) => format!("{number:.places$}"),
                None => n.to_string(),
            },
            (Some(value), _) => display_value(value).into_owned(),
            (None, _) => String::new(),
        }
    }

    /// The layout a row links to, if its view has layout details.
    pub fn detail_target(&self, row: &Row) -> Option<String> {
        let column = self.config.detail_column?;
        let name = cell_text(row, column);
        self.config
            .links_detail(column, &name)
            .then(|| name.into_owned())
    }
}
