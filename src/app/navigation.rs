use crate::app::AppState;

impl AppState<'_> {
    /// Rows and visible columns of the current view after filtering.
    fn view_extent(&self) -> (usize, usize) {
        self.controller()
            .map(|c| (c.summary().filtered_rows, c.display_columns().len()))
            .unwrap_or((0, 0))
    }

    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let (rows, cols) = self.view_extent();
        let tab = self.tab_mut();

        let max_row = rows.saturating_sub(1) as isize;
        let max_col = cols.saturating_sub(1) as isize;
        tab.selected_row = (tab.selected_row as isize + delta_row).clamp(0, max_row) as usize;
        tab.selected_col = (tab.selected_col as isize + delta_col).clamp(0, max_col) as usize;

        self.handle_scrolling();
    }

    /// Keeps the cursor inside the view after filters shrink it.
    pub fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    pub fn handle_scrolling(&mut self) {
        let visible_rows = self.visible_rows.max(1);
        let visible_cols = self.visible_cols.max(1);
        let tab = self.tab_mut();

        if tab.selected_row < tab.start_row {
            tab.start_row = tab.selected_row;
        } else if tab.selected_row >= tab.start_row + visible_rows {
            tab.start_row = tab.selected_row + 1 - visible_rows;
        }

        if tab.selected_col < tab.start_col {
            tab.start_col = tab.selected_col;
        } else if tab.selected_col >= tab.start_col + visible_cols {
            tab.start_col = tab.selected_col + 1 - visible_cols;
        }
    }

    pub fn jump_to_first_row(&mut self) {
        self.tab_mut().selected_row = 0;
        self.handle_scrolling();
    }

    pub fn jump_to_last_row(&mut self) {
        let (rows, _) = self.view_extent();
        self.tab_mut().selected_row = rows.saturating_sub(1);
        self.handle_scrolling();
    }

    pub fn jump_to_first_column(&mut self) {
        self.tab_mut().selected_col = 0;
        self.handle_scrolling();
    }

    pub fn jump_to_last_column(&mut self) {
        let (_, cols) = self.view_extent();
        self.tab_mut().selected_col = cols.saturating_sub(1);
        self.handle_scrolling();
    }

    pub fn page(&mut self, forward: bool) {
        let step = self.visible_rows.max(1) as isize;
        self.move_cursor(if forward { step } else { -step }, 0);
    }

    /// Name of the visible column under the cursor.
    pub fn selected_column(&self) -> Option<String> {
        let controller = self.controller()?;
        controller
            .display_columns()
            .get(self.tab().selected_col)
            .map(|column| column.to_string())
    }
}
