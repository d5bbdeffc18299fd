//! One configuration-driven table used by every dashboard view.

pub mod columns;
pub mod config;
pub mod controller;
pub mod filter;
pub mod sort;
pub mod state;

pub use columns::{ColumnVisibility, DefaultColumns, arrange_columns, infer_columns};
pub use config::TableConfig;
pub use controller::{TableController, TableSummary};
pub use filter::{
    BusinessField, ColumnFilters, DropdownFilters, SearchScope, distinct_values, matches_search,
    resolve_column,
};
pub use sort::{
    MissingValues, NumericParse, SortDirection, SortPolicy, SortState, UNSORTED_INDICATOR,
    compare_values, numeric_key, sort_rows,
};
pub use state::ViewState;
