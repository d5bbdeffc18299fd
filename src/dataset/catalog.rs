use std::fmt;
use std::str::FromStr;

/// How a dataset's sheet is picked out of the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMatch {
    /// The sheet name must match exactly.
    Exact(&'static str),
    /// The first sheet whose lowercase name contains any of these.
    Contains(&'static [&'static str]),
}

/// How sheet lines are turned into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Blank cells are left out of each row.
    Records,
    /// Every header appears in every row, blanks as `""`.
    HeaderIndexed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    Layouts,
    Categories,
    Electronics,
    Jcd,
    VendorList,
    Promos,
}

#[derive(Debug, Clone, Copy)]
pub struct DatasetSpec {
    pub dataset: Dataset,
    /// Human name used in titles and error messages.
    pub label: &'static str,
    pub route: &'static str,
    pub sheet: SheetMatch,
    pub parse: ParseMode,
    pub rename_layout: bool,
    pub split_dimensions: bool,
    /// Whether a missing workbook is answered with 404 rather than 500.
    pub missing_file_not_found: bool,
    /// Whether a missing sheet is answered with 404 rather than 500.
    pub missing_sheet_not_found: bool,
}

pub const DATASETS: [DatasetSpec; 6] = [
    DatasetSpec {
        dataset: Dataset::Layouts,
        label: "DDF",
        route: "/api/layouts",
        sheet: SheetMatch::Exact("DDF"),
        parse: ParseMode::Records,
        rename_layout: false,
        split_dimensions: false,
        missing_file_not_found: false,
        missing_sheet_not_found: false,
    },
    DatasetSpec {
        dataset: Dataset::Categories,
        label: "Categories",
        route: "/api/categories",
        sheet: SheetMatch::Contains(&["categories", "category"]),
        parse: ParseMode::Records,
        rename_layout: false,
        split_dimensions: false,
        missing_file_not_found: true,
        missing_sheet_not_found: true,
    },
    DatasetSpec {
        dataset: Dataset::Electronics,
        label: "Electronics",
        route: "/api/electronics",
        sheet: SheetMatch::Contains(&["electronics", "electronic", "elec"]),
        parse: ParseMode::HeaderIndexed,
        rename_layout: true,
        split_dimensions: false,
        missing_file_not_found: true,
        missing_sheet_not_found: true,
    },
    DatasetSpec {
        dataset: Dataset::Jcd,
        label: "JCD",
        route: "/api/jcd",
        sheet: SheetMatch::Contains(&["jcd"]),
        parse: ParseMode::Records,
        rename_layout: false,
        split_dimensions: true,
        missing_file_not_found: false,
        missing_sheet_not_found: true,
    },
    DatasetSpec {
        dataset: Dataset::VendorList,
        label: "Vendor List",
        route: "/api/vendor-list",
        sheet: SheetMatch::Contains(&["vendor", "vendor list", "vendorlist"]),
        parse: ParseMode::Records,
        rename_layout: false,
        split_dimensions: false,
        missing_file_not_found: true,
        missing_sheet_not_found: true,
    },
    DatasetSpec {
        dataset: Dataset::Promos,
        label: "Promos",
        route: "/api/promos",
        sheet: SheetMatch::Contains(&["promos", "promo"]),
        parse: ParseMode::Records,
        rename_layout: false,
        split_dimensions: false,
        missing_file_not_found: true,
        missing_sheet_not_found: true,
    },
];

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::Layouts,
        Dataset::Categories,
        Dataset::Electronics,
        Dataset::Jcd,
        Dataset::VendorList,
        Dataset::Promos,
    ];

    pub fn spec(self) -> &'static DatasetSpec {
        match self {
            Dataset::Layouts => &DATASETS[0],
            Dataset::Categories => &DATASETS[1],
            Dataset::Electronics => &DATASETS[2],
            Dataset::Jcd => &DATASETS[3],
            Dataset::VendorList => &DATASETS[4],
            Dataset::Promos => &DATASETS[5],
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Dataset::Layouts => "layouts",
            Dataset::Categories => "categories",
            Dataset::Electronics => "electronics",
            Dataset::Jcd => "jcd",
            Dataset::VendorList => "vendor-list",
            Dataset::Promos => "promos",
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "layouts" | "layout" | "ddf" => Ok(Dataset::Layouts),
            "categories" | "category" => Ok(Dataset::Categories),
            "electronics" | "electronic" | "elec" => Ok(Dataset::Electronics),
            "jcd" => Ok(Dataset::Jcd),
            "vendor-list" | "vendorlist" | "vendors" | "vendor" => Ok(Dataset::VendorList),
            "promos" | "promo" | "exclusive-promos" => Ok(Dataset::Promos),
            other => Err(format!("unknown dataset: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_table_lines_up_with_variants() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.spec().dataset, dataset);
            assert!(dataset.spec().route.ends_with(dataset.slug()));
        }
    }

    #[test]
    fn parses_dataset_aliases() {
        assert_eq!("DDF".parse::<Dataset>(), Ok(Dataset::Layouts));
        assert_eq!("Vendor List".parse::<Dataset>(), Ok(Dataset::VendorList));
        assert_eq!("vendor_list".parse::<Dataset>(), Ok(Dataset::VendorList));
        assert_eq!("jcd".parse::<Dataset>(), Ok(Dataset::Jcd));
        assert!("inventory".parse::<Dataset>().is_err());
    }
}
