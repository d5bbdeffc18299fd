use crate::dataset::catalog::{Dataset, SheetMatch};
use crate::error::DashboardError;

/// Returns the first sheet name (in workbook order) that satisfies `rule`.
pub fn locate_sheet<'a>(rule: &SheetMatch, sheet_names: &'a [String]) -> Option<&'a str> {
    match rule {
        SheetMatch::Exact(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == *name)
            .map(String::as_str),
        SheetMatch::Contains(terms) => sheet_names
            .iter()
            .find(|candidate| {
                let lower = candidate.to_lowercase();
                terms.iter().any(|term| lower.contains(term))
            })
            .map(String::as_str),
    }
}

/// Finds the sheet backing `dataset`, or reports the sheets that do exist.
pub fn find_sheet(dataset: Dataset, sheet_names: &[String]) -> Result<String, DashboardError> {
    let spec = dataset.spec();
    locate_sheet(&spec.sheet, sheet_names)
        .map(str::to_string)
        .ok_or_else(|| DashboardError::SheetNotFound {
            label: spec.label,
            available: sheet_names.to_vec(),
        })
}
