use std::path::PathBuf;

use crate::app::{AppState, InputMode};
use crate::table::BusinessField;

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Reload,
    View(String),
    Sort(String),
    Search(String),
    ToggleColumn(String),
    ListColumns,
    ShowAllColumns,
    FilterValue { column: String, value: String },
    FilterAll(String),
    ListValues(String),
    Pick { field: BusinessField, value: Option<String> },
    Clear(Option<String>),
    Export(Option<PathBuf>),
    Spec(Option<PathBuf>),
}

fn split_assignment(args: &str) -> Option<(&str, &str)> {
    let (left, right) = args.split_once('=')?;
    let (left, right) = (left.trim(), right.trim());
    (!left.is_empty()).then_some((left, right))
}

fn optional_path(args: &str) -> Option<PathBuf> {
    (!args.is_empty()).then(|| PathBuf::from(args))
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    // Everything after the first word is the argument, spaces included
    let (name, args) = match input.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (input, ""),
    };

    let required = |usage: &str| -> Result<String, String> {
        if args.is_empty() {
            Err(format!("Usage: {usage}"))
        } else {
            Ok(args.to_string())
        }
    };

    match name {
        "q" | "q!" | "quit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        "reload" | "e" => Ok(Command::Reload),
        "view" => required(":view [name]").map(Command::View),
        "sort" => required(":sort [column]").map(Command::Sort),
        "search" => Ok(Command::Search(args.to_string())),
        "col" => required(":col [column]").map(Command::ToggleColumn),
        "cols" => Ok(Command::ListColumns),
        "all" => Ok(Command::ShowAllColumns),
        "values" => required(":values [column]").map(Command::ListValues),
        "filter" => {
            // `*` selects every value of the column
            let (column, value) = split_assignment(args)
                .ok_or_else(|| "Usage: :filter [column]=[value|*]".to_string())?;
            if value == "*" {
                Ok(Command::FilterAll(column.to_string()))
            } else {
                Ok(Command::FilterValue {
                    column: column.to_string(),
                    value: value.to_string(),
                })
            }
        }
        "pick" => {
            let (field, value) = split_assignment(args)
                .ok_or_else(|| "Usage: :pick [field]=[value|all]".to_string())?;
            let field = BusinessField::from_name(field)
                .ok_or_else(|| format!("Unknown field: {field}"))?;
            // An empty value or `all` resets the dropdown
            let value = (!value.is_empty() && !value.eq_ignore_ascii_case("all"))
                .then(|| value.to_string());
            Ok(Command::Pick { field, value })
        }
        "clear" => Ok(Command::Clear((!args.is_empty()).then(|| args.to_string()))),
        "export" => Ok(Command::Export(optional_path(args))),
        "spec" => Ok(Command::Spec(optional_path(args))),
        _ => Err(format!("Unknown command: {input}")),
    }
}

impl AppState<'_> {
    pub fn execute_command(&mut self) {
        let command = self.input_buffer.clone();
        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();

        if command.trim().is_empty() {
            return;
        }

        match parse_command(&command) {
            Ok(command) => self.run_command(command),
            Err(message) => self.add_notification(message),
        }

        // A command typed over the detail popup closes it.
        if matches!(self.input_mode, InputMode::Normal) {
            self.detail = None;
        }
    }

    pub fn run_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Help => self.show_help(),
            Command::Reload => self.reload_current_view(),
            Command::View(name) => self.switch_to_dataset(&name),
            Command::Sort(column) => self.sort_by_name(&column),
            Command::Search(text) => self.apply_search(&text),
            Command::ToggleColumn(column) => self.toggle_column(&column),
            Command::ListColumns => self.list_columns(),
            Command::ShowAllColumns => {
                if let Some(controller) = self.controller_mut() {
                    controller.show_all_columns();
                    self.add_notification("All columns visible".to_string());
                }
            }
            Command::ListValues(column) => self.list_values(&column),
            Command::FilterValue { column, value } => self.toggle_filter(&column, Some(&value)),
            Command::FilterAll(column) => self.toggle_filter(&column, None),
            Command::Pick { field, value } => self.pick(field, value),
            Command::Clear(column) => self.clear(column.as_deref()),
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.default_export_path("json"));
                self.export_rows(&path);
            }
            Command::Spec(path) => {
                let path = path.unwrap_or_else(|| self.default_export_path("xlsx"));
                self.export_specification(&path);
            }
        }
    }

    fn default_export_path(&self, extension: &str) -> PathBuf {
        // Name the file after the open layout or the current view
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let stem = match (&self.detail, extension) {
            (Some(detail), "xlsx") => format!("{}_specification", detail.name()),
            _ => self.tab().dataset.slug().to_string(),
        };
        PathBuf::from(format!("{stem}_{timestamp}.{extension}"))
    }

    /// Resolves a user-typed column name against the current view.
    fn column_named(&mut self, name: &str) -> Option<String> {
        let resolved = self
            .controller()
            .and_then(|c| c.resolve_column_name(name))
            .map(str::to_string);
        if resolved.is_none() {
            self.add_notification(format!("Unknown column: {name}"));
        }
        resolved
    }

    pub fn sort_by_name(&mut self, name: &str) {
        let Some(column) = self.column_named(name) else {
            return;
        };
        self.sort_by(&column);
    }

    pub fn sort_by(&mut self, column: &str) {
        let Some(controller) = self.controller_mut() else {
            return;
        };
        controller.request_sort(column);
        let indicator = controller.sort_indicator(column);

        // Jump back to the first row of the new order
        self.tab_mut().selected_row = 0;
        self.handle_scrolling();
        self.add_notification(format!("Sorted by {column} {indicator}"));
    }

    pub fn toggle_column(&mut self, name: &str) {
        let Some(controller) = self.controller_mut() else {
            return;
        };
        match controller.toggle_column(name) {
            Some(true) => self.add_notification(format!("Column {name} shown")),
            Some(false) => {
                // The cursor may have been on the hidden column
                self.clamp_cursor();
                self.add_notification(format!("Column {name} hidden"));
            }
            None => self.add_notification(format!("Unknown column: {name}")),
        }
    }

    fn list_columns(&mut self) {
        let Some(controller) = self.controller() else {
            return;
        };
        let listing = controller
            .columns()
            .iter()
            .map(|column| {
                let mark = if controller.is_column_visible(column) { "x" } else { " " };
                format!("[{mark}] {column}")
            })
            .collect::<Vec<_>>()
            .join("  ");
        self.add_notification(listing);
    }

    fn list_values(&mut self, name: &str) {
        let Some(column) = self.column_named(name) else {
            return;
        };
        let values = self
            .controller()
            .map(|c| c.filter_options(&column))
            .unwrap_or_default();
        self.add_notification(format!("{column}: {}", values.join(", ")));
    }

    fn filters_enabled(&mut self, dropdown: bool) -> bool {
        let config = self.tab().config();
        let enabled = if dropdown {
            config.dropdown_filters
        } else {
            config.column_filters
        };
        if !enabled {
            self.add_notification(format!("Filters are not available in {}", config.title));
        }
        enabled
    }

    /// Toggles one value of a column filter, or selects all values with `None`.
    fn toggle_filter(&mut self, name: &str, value: Option<&str>) {
        if !self.filters_enabled(false) {
            return;
        }
        let Some(column) = self.column_named(name) else {
            return;
        };
        let Some(controller) = self.controller_mut() else {
            return;
        };

        match value {
            Some(value) => controller.toggle_filter_value(&column, value),
            None => controller.select_all_filter(&column),
        }
        let selected = controller.column_filters().selected(&column).join(", ");

        self.tab_mut().reset_cursor();
        self.add_notification(format!("Filter {column}: {selected}"));
    }

    fn pick(&mut self, field: BusinessField, value: Option<String>) {
        if !self.filters_enabled(true) {
            return;
        }
        let Some(controller) = self.controller_mut() else {
            return;
        };
        // Only values present in the data can be picked
        if let Some(v) = &value {
            if !controller.dropdown_options(field).contains(v) {
                self.add_notification(format!("No {field} named {v}"));
                return;
            }
        }
        controller.set_dropdown(field, value.clone());

        self.tab_mut().reset_cursor();
        self.add_notification(format!(
            "{field}: {}",
            value.as_deref().unwrap_or("all")
        ));
    }

    fn clear(&mut self, column: Option<&str>) {
        match column {
            Some(name) => {
                let Some(column) = self.column_named(name) else {
                    return;
                };
                if let Some(controller) = self.controller_mut() {
                    controller.clear_filter(&column);
                }
                self.add_notification(format!("Cleared filter on {column}"));
            }
            None => {
                if let Some(controller) = self.controller_mut() {
                    controller.clear_filters();
                }
                self.add_notification("Cleared search and filters".to_string());
            }
        }
        self.clamp_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(" help "), Ok(Command::Help));
        assert_eq!(parse_command("cols"), Ok(Command::ListColumns));
        assert_eq!(parse_command("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn column_names_may_contain_spaces() {
        assert_eq!(
            parse_command("sort Layout Name"),
            Ok(Command::Sort("Layout Name".into()))
        );
        assert_eq!(
            parse_command("filter Country/City = UAE"),
            Ok(Command::FilterValue {
                column: "Country/City".into(),
                value: "UAE".into()
            })
        );
        assert_eq!(
            parse_command("filter Brand=*"),
            Ok(Command::FilterAll("Brand".into()))
        );
    }

    #[test]
    fn pick_resets_with_all() {
        assert_eq!(
            parse_command("pick company=Acme"),
            Ok(Command::Pick {
                field: BusinessField::Company,
                value: Some("Acme".into())
            })
        );
        assert_eq!(
            parse_command("pick Zone=all"),
            Ok(Command::Pick {
                field: BusinessField::Zone,
                value: None
            })
        );
        assert!(parse_command("pick planet=Mars").is_err());
    }

    #[test]
    fn export_paths_are_optional() {
        assert_eq!(parse_command("export"), Ok(Command::Export(None)));
        assert_eq!(
            parse_command("spec out/ca.xlsx"),
            Ok(Command::Spec(Some(PathBuf::from("out/ca.xlsx"))))
        );
    }

    #[test]
    fn missing_arguments_report_usage() {
        assert_eq!(parse_command("sort"), Err("Usage: :sort [column]".to_string()));
        assert!(parse_command("filter Brand").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
