use std::path::Path;

use crate::app::AppState;
use crate::app::InputMode;
use crate::export::{export_specification_xlsx, write_json_to_file};
use crate::rows::Row;

impl AppState<'_> {
    pub fn show_help(&mut self) {
        self.help_scroll = 0;

        self.help_text = "VIEWS:\n\
             [           - Previous view\n\
             ]           - Next view\n\
             :view [name] - Switch view (layouts, categories, electronics, jcd, vendor-list, promos)\n\
             :reload     - Fetch the current view again\n\n\
             NAVIGATION:\n\
             hjkl        - Move cursor (left, down, up, right)\n\
             0           - Jump to first column\n\
             $           - Jump to last column\n\
             gg          - Jump to first row\n\
             G           - Jump to last row\n\
             PgUp/PgDn   - Scroll one page\n\
             Enter       - Open layout details (Layouts and Electronics)\n\n\
             SORTING:\n\
             s           - Sort by current column (again to reverse)\n\
             :sort [column] - Sort by a column by name\n\n\
             SEARCH:\n\
             /           - Search rows\n\
             :search [text] - Search rows, empty text clears\n\n\
             COLUMNS:\n\
             x           - Hide current column\n\
             :col [column] - Show or hide a column\n\
             :cols       - List columns\n\
             :all        - Show every column\n\n\
             FILTERS (Vendor List):\n\
             :filter [column]=[value] - Toggle a value in a column filter\n\
             :filter [column]=*       - Select every value of a column\n\
             :values [column]         - List a column's values\n\
             :pick [field]=[value]    - Company, Brand, Country, Location or Zone; value 'all' resets\n\
             :clear [column]          - Clear one column filter\n\
             :clear      - Clear search and every filter\n\n\
             EXPORT:\n\
             :export [file.json] - Write the filtered rows as JSON\n\
             :spec [file.xlsx]   - Write the selected layout's specification\n\n\
             UI ADJUSTMENTS:\n\
             +/=         - Increase info panel height\n\
             -           - Decrease info panel height\n\n\
             :help       - Show this help\n\
             q, :q       - Quit"
            .to_string();

        self.input_mode = InputMode::Help;
    }

    /// The row under the cursor, in the current sort order.
    pub fn selected_row(&self) -> Option<&Row> {
        let controller = self.controller()?;
        controller.view().get(self.tab().selected_row).copied()
    }

    fn selected_layout(&self) -> Option<String> {
        let controller = self.controller()?;
        let row = self.selected_row()?;
        controller.detail_target(row)
    }

    pub fn open_detail(&mut self) {
        let Some(name) = self.selected_layout() else {
            self.add_notification("No layout details for this row".to_string());
            return;
        };

        match self.client.fetch_layout(&name) {
            Ok(detail) => {
                self.detail = Some(detail);
                self.input_mode = InputMode::Detail;
            }
            Err(e) => self.add_notification(format!("Failed to load layout {name}: {e}")),
        }
    }

    pub fn export_rows(&mut self, path: &Path) {
        let Some(controller) = self.controller() else {
            self.add_notification("Nothing to export".to_string());
            return;
        };

        let (count, result) = {
            let rows = controller.view();
            (rows.len(), write_json_to_file(&rows, path))
        };
        match result {
            Ok(()) => self.add_notification(format!(
                "Exported {count} rows to {}",
                path.display()
            )),
            Err(e) => self.add_notification(format!("Export failed: {e}")),
        }
    }

    pub fn export_specification(&mut self, path: &Path) {
        if self.detail.is_none() {
            let Some(name) = self.selected_layout() else {
                self.add_notification("Select a layout first".to_string());
                return;
            };
            match self.client.fetch_layout(&name) {
                Ok(detail) => self.detail = Some(detail),
                Err(e) => {
                    self.add_notification(format!("Failed to load layout {name}: {e}"));
                    return;
                }
            }
        }

        let Some(detail) = &self.detail else {
            return;
        };
        let result = export_specification_xlsx(detail, path);
        let name = detail.name();

        match result {
            Ok(()) => self.add_notification(format!(
                "Specification for {name} saved to {}",
                path.display()
            )),
            Err(e) => self.add_notification(format!("Export failed: {e}")),
        }
    }
}
