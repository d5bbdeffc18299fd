use crate::rows::Row;

/// Ordered union of row keys: the first row's keys, then keys that only
/// appear in later rows, in order of first appearance.
pub fn infer_columns(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Drops headers containing any of `hidden_terms`, then moves the first header
/// matching each of `leading_terms` to the front, in term order.
pub fn arrange_columns(
    columns: Vec<String>,
    hidden_terms: &[&str],
    leading_terms: &[&str],
) -> Vec<String> {
    let mut remaining: Vec<String> = columns
        .into_iter()
        .filter(|column| {
            let lower = column.to_lowercase();
            !hidden_terms.iter().any(|term| lower.contains(term))
        })
        .collect();

    let mut arranged = Vec::with_capacity(remaining.len());
    for term in leading_terms {
        if let Some(idx) = remaining
            .iter()
            .position(|column| column.to_lowercase().contains(term))
        {
            arranged.push(remaining.remove(idx));
        }
    }
    arranged.extend(remaining);
    arranged
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultColumns {
    All,
    FirstN(usize),
    /// Named columns first (when present), then others until `fill_to` are shown.
    Preferred {
        names: Vec<String>,
        fill_to: usize,
    },
    /// Exactly these names; names the data lacks are simply never rendered.
    Fixed(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct ColumnVisibility {
    visible: Vec<String>,
}

impl ColumnVisibility {
    pub fn with_defaults(columns: &[String], defaults: &DefaultColumns) -> Self {
        let visible = match defaults {
            DefaultColumns::All => columns.to_vec(),
            DefaultColumns::FirstN(n) => columns.iter().take(*n).cloned().collect(),
            DefaultColumns::Preferred { names, fill_to } => {
                let mut visible: Vec<String> = names
                    .iter()
                    .filter(|name| columns.contains(name))
                    .cloned()
                    .collect();
                for column in columns {
                    if visible.len() >= *fill_to {
                        break;
                    }
                    if !visible.contains(column) {
                        visible.push(column.clone());
                    }
                }
                visible
            }
            DefaultColumns::Fixed(names) => names.clone(),
        };
        Self { visible }
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|c| c == column)
    }

    /// Flips a column's visibility and returns whether it is now shown.
    pub fn toggle(&mut self, column: &str) -> bool {
        match self.visible.iter().position(|c| c == column) {
            Some(idx) => {
                self.visible.remove(idx);
                false
            }
            None => {
                self.visible.push(column.to_string());
                true
            }
        }
    }

    pub fn show_all(&mut self, columns: &[String]) {
        self.visible = columns.to_vec();
    }

    /// Visible columns in display order.
    pub fn visible_in<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        columns
            .iter()
            .filter(|column| self.is_visible(column))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn union_keeps_first_row_order_and_appends_late_keys() {
        let mut first = Row::new();
        first.insert("B".into(), json!(1));
        first.insert("A".into(), json!(2));
        let mut second = Row::new();
        second.insert("A".into(), json!(3));
        second.insert("C".into(), json!(4));

        assert_eq!(infer_columns(&[first, second]), names(&["B", "A", "C"]));
        assert!(infer_columns(&[]).is_empty());
    }

    #[test]
    fn arrange_hides_placeholders_and_leads_with_company_then_brand() {
        let columns = names(&["Zone", "__EMPTY", "Brand Name", "Company", "Empty Col", "City"]);
        assert_eq!(
            arrange_columns(columns, &["empty"], &["company", "brand"]),
            names(&["Company", "Brand Name", "Zone", "City"])
        );
    }

    #[test]
    fn preferred_defaults_fill_up_to_limit() {
        let columns = names(&["Id", "Width", "Layout Name", "Notes", "Height", "Site", "Extra"]);
        let visibility = ColumnVisibility::with_defaults(
            &columns,
            &DefaultColumns::Preferred {
                names: names(&["Layout Name", "Width", "Height"]),
                fill_to: 5,
            },
        );

        assert_eq!(
            visibility.visible_in(&columns),
            vec!["Id", "Width", "Layout Name", "Notes", "Height"]
        );
        assert!(!visibility.is_visible("Site"));
    }

    #[test]
    fn fixed_defaults_ignore_missing_names() {
        let columns = names(&["Layout Name", "Width", "Ratio"]);
        let visibility =
            ColumnVisibility::with_defaults(&columns, &DefaultColumns::Fixed(names(&["Layout Name", "Canvas width"])));
        assert_eq!(visibility.visible_in(&columns), vec!["Layout Name"]);
    }

    #[test]
    fn toggle_only_changes_membership() {
        let columns = names(&["A", "B", "C", "D", "E"]);
        let mut visibility = ColumnVisibility::with_defaults(&columns, &DefaultColumns::FirstN(4));
        assert!(!visibility.is_visible("E"));

        assert!(visibility.toggle("E"));
        assert!(!visibility.toggle("A"));
        assert_eq!(visibility.visible_in(&columns), vec!["B", "C", "D", "E"]);
    }
}
