use crate::dataset::Dataset;
use crate::rows::LAYOUT_NAME_COLUMN;
use crate::table::columns::DefaultColumns;
use crate::table::filter::SearchScope;
use crate::table::sort::{MissingValues, NumericParse, SortPolicy, SortState};

/// Layouts in the electronics sheet that have no detail page.
const UNLINKED_ELECTRONICS: [&str; 3] = [
    "CA_DM801 Innov8 part1",
    "CA_DM801 Innov8 part2",
    "CB_DM504_DM505_DM506",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Everything that differs between the dashboard's tabular views.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub dataset: Dataset,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub loading_message: &'static str,
    pub empty_title: &'static str,
    pub empty_hint: &'static str,
    pub error_title: &'static str,
    pub error_hint: &'static str,

    pub default_sort: Option<SortState>,
    pub sort_policy: SortPolicy,
    pub search: SearchScope,
    pub default_columns: DefaultColumns,
    pub hidden_column_terms: Vec<&'static str>,
    pub leading_column_terms: Vec<&'static str>,
    pub column_filters: bool,
    pub dropdown_filters: bool,

    /// Rename the raw `Layout` key to `Layout Name` when rows arrive.
    pub rename_layout_column: bool,
    /// Column whose value names a layout with a detail view.
    pub detail_column: Option<&'static str>,
    pub unlinked_layouts: Vec<&'static str>,
    /// Columns rendered with a fixed number of decimals when numeric.
    pub fixed_decimals: Vec<(&'static str, usize)>,
}

impl TableConfig {
    fn base(dataset: Dataset, title: &'static str) -> Self {
        Self {
            dataset,
            title,
            subtitle: "",
            loading_message: "Loading...",
            empty_title: "No data available",
            empty_hint: "",
            error_title: "Error",
            error_hint: "",
            default_sort: None,
            sort_policy: SortPolicy::default(),
            search: SearchScope::All,
            default_columns: DefaultColumns::All,
            hidden_column_terms: Vec::new(),
            leading_column_terms: Vec::new(),
            column_filters: false,
            dropdown_filters: false,
            rename_layout_column: false,
            detail_column: None,
            unlinked_layouts: Vec::new(),
            fixed_decimals: Vec::new(),
        }
    }

    pub fn for_dataset(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Layouts => Self {
                subtitle: "Digital Display Format layouts",
                error_title: "Error Loading Layouts",
                error_hint: "Make sure layouts.xlsx contains a sheet named \"DDF\".",
                default_sort: Some(SortState::ascending(LAYOUT_NAME_COLUMN)),
                sort_policy: SortPolicy {
                    numeric_columns: owned(&["Width", "Height", "Canvas Width", "Canvas Height", "Ratio"]),
                    ..Default::default()
                },
                search: SearchScope::Columns(owned(&[LAYOUT_NAME_COLUMN])),
                default_columns: DefaultColumns::Fixed(owned(&[
                    LAYOUT_NAME_COLUMN,
                    "Width",
                    "Height",
                    "Canvas width",
                    "Canvas height",
                ])),
                rename_layout_column: true,
                detail_column: Some(LAYOUT_NAME_COLUMN),
                fixed_decimals: vec![("Ratio", 2)],
                ..Self::base(dataset, "Layouts")
            },
            Dataset::Categories => Self {
                subtitle: "Layout categories",
                loading_message: "Loading categories...",
                empty_title: "No Categories Found",
                empty_hint: "Add a \"Categories\" sheet to your layouts.xlsx file with category data.",
                error_title: "Error Loading Categories",
                error_hint: "Make sure you have added a \"Categories\" sheet to your layouts.xlsx file.",
                default_columns: DefaultColumns::FirstN(4),
                ..Self::base(dataset, "Categories")
            },
            Dataset::Electronics => Self {
                subtitle: "Electronics layouts",
                error_title: "Error Loading Electronics",
                default_sort: Some(SortState::ascending(LAYOUT_NAME_COLUMN)),
                sort_policy: SortPolicy {
                    numeric_columns: owned(&["Width", "Height", "Canvas width", "Canvas height", "Ratio"]),
                    ..Default::default()
                },
                detail_column: Some(LAYOUT_NAME_COLUMN),
                unlinked_layouts: UNLINKED_ELECTRONICS.to_vec(),
                ..Self::base(dataset, "Electronics")
            },
            Dataset::Jcd => Self {
                subtitle: "Layout Specifications & Dimensions",
                loading_message: "Loading JCD layouts...",
                empty_title: "No JCD Data Found",
                empty_hint: "Add a \"JCD\" sheet to your layouts.xlsx file with layout data.",
                error_title: "Error Loading JCD Data",
                error_hint: "Make sure you have added a \"JCD\" sheet to your layouts.xlsx file.",
                sort_policy: SortPolicy {
                    numeric_columns: owned(&["Width", "Height"]),
                    numeric_parse: NumericParse::DigitsOnly,
                    ..Default::default()
                },
                default_columns: DefaultColumns::Preferred {
                    names: owned(&[LAYOUT_NAME_COLUMN, "Width", "Height"]),
                    fill_to: 5,
                },
                ..Self::base(dataset, "JCD Layouts")
            },
            Dataset::VendorList => Self {
                subtitle: "Digital Signage Player Network",
                loading_message: "Loading vendor list...",
                empty_title: "No Vendor Data Found",
                empty_hint: "Add a \"Vendor List\" sheet to your layouts.xlsx file with vendor data.",
                error_title: "Error Loading Vendor List",
                error_hint: "Make sure you have added a \"Vendor List\" sheet to your layouts.xlsx file.",
                default_columns: DefaultColumns::FirstN(8),
                hidden_column_terms: vec!["empty"],
                leading_column_terms: vec!["company", "brand"],
                column_filters: true,
                dropdown_filters: true,
                ..Self::base(dataset, "Vendor List")
            },
            Dataset::Promos => Self {
                subtitle: "Promotional layouts",
                default_sort: Some(SortState::ascending("Digital Media")),
                sort_policy: SortPolicy {
                    missing: MissingValues::Last,
                    ..Default::default()
                },
                ..Self::base(dataset, "Promos")
            },
        }
    }

    pub fn decimals_for(&self, column: &str) -> Option<usize> {
        self.fixed_decimals
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, places)| *places)
    }

    /// Whether a cell of `column` holding `value` opens a layout detail.
    pub fn links_detail(&self, column: &str, value: &str) -> bool {
        self.detail_column == Some(column)
            && !value.is_empty()
            && !self.unlinked_layouts.contains(&value)
    }
}
