use tui_textarea::TextArea;

use crate::app::AppState;
use crate::app::InputMode;

impl AppState<'_> {
    pub fn start_search(&mut self) {
        if self.controller().is_none() {
            self.add_notification("Nothing to search yet".to_string());
            return;
        }

        let current = self
            .controller()
            .map(|c| c.search().to_string())
            .unwrap_or_default();

        self.input_mode = InputMode::Search;
        self.text_area = TextArea::new(vec![current]);
        self.text_area.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn execute_search(&mut self) {
        let query = self.text_area.lines().join(" ");
        self.apply_search(&query);

        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();
        self.text_area = TextArea::default();
    }

    pub fn apply_search(&mut self, query: &str) {
        let Some(controller) = self.controller_mut() else {
            return;
        };

        controller.set_search(query.trim());
        let matches = controller.summary().filtered_rows;

        self.tab_mut().reset_cursor();
        if query.trim().is_empty() {
            self.add_notification("Search cleared".to_string());
        } else if matches == 0 {
            self.add_notification(format!("Pattern not found: {}", query.trim()));
        } else {
            self.add_notification(format!("{} matches found for: {}", matches, query.trim()));
        }
    }
}
