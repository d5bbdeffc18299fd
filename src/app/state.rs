use tui_textarea::TextArea;

use crate::client::DashboardClient;
use crate::counter::AnimatedCounter;
use crate::dataset::Dataset;
use crate::layout::LayoutDetail;
use crate::table::{TableConfig, TableController, ViewState};

pub enum InputMode {
    Normal,
    Command,
    Search,
    Help,
    Detail,
}

/// One dashboard view and where the cursor sits in it.
pub struct TabView {
    pub dataset: Dataset,
    pub state: ViewState,
    /// Index into the filtered, sorted rows.
    pub selected_row: usize,
    /// Index into the visible columns.
    pub selected_col: usize,
    pub start_row: usize,
    pub start_col: usize,
}

impl TabView {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            state: ViewState::Loading,
            selected_row: 0,
            selected_col: 0,
            start_row: 0,
            start_col: 0,
        }
    }

    pub fn config(&self) -> TableConfig {
        match &self.state {
            ViewState::Ready(controller) => controller.config().clone(),
            _ => TableConfig::for_dataset(self.dataset),
        }
    }

    pub fn reset_cursor(&mut self) {
        self.selected_row = 0;
        self.selected_col = 0;
        self.start_row = 0;
        self.start_col = 0;
    }
}

pub struct AppState<'a> {
    pub client: DashboardClient,
    pub tabs: Vec<TabView>,
    pub current_tab: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
    pub column_width: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub text_area: TextArea<'a>,
    pub should_quit: bool,
    pub g_pressed: bool,
    pub info_panel_height: usize,
    pub notification_messages: Vec<String>,
    pub max_notifications: usize,
    pub help_text: String,
    pub help_scroll: usize,
    pub help_visible_lines: usize,
    pub counter: AnimatedCounter,
    pub detail: Option<LayoutDetail>,
}

impl AppState<'_> {
    pub fn new(client: DashboardClient, initial: Dataset) -> Self {
        // One tab per dataset, all of them waiting for their first fetch
        let tabs: Vec<TabView> = Dataset::ALL.into_iter().map(TabView::new).collect();

        // Start on the requested view, falling back to the first tab
        let current_tab = Dataset::ALL
            .iter()
            .position(|dataset| *dataset == initial)
            .unwrap_or(0);

        Self {
            client,
            tabs,
            current_tab,
            visible_rows: 20,
            visible_cols: 6,
            column_width: 18,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            text_area: TextArea::default(),
            should_quit: false,
            g_pressed: false,
            info_panel_height: 8,
            notification_messages: Vec::new(),
            max_notifications: 5,
            help_text: String::new(),
            help_scroll: 0,
            help_visible_lines: 20,
            counter: AnimatedCounter::default(),
            detail: None,
        }
    }

    pub fn add_notification(&mut self, message: String) {
        self.notification_messages.push(message);

        // Drop the oldest message once the panel is full
        if self.notification_messages.len() > self.max_notifications {
            self.notification_messages.remove(0);
        }
    }

    pub fn adjust_info_panel_height(&mut self, delta: isize) {
        // Keep the panel between 6 and 16 lines
        let new_height = (self.info_panel_height as isize + delta).clamp(6, 16) as usize;
        if new_height != self.info_panel_height {
            self.info_panel_height = new_height;
            self.add_notification(format!("Info panel height: {}", self.info_panel_height));
        }
    }

    pub fn tab(&self) -> &TabView {
        &self.tabs[self.current_tab]
    }

    pub fn tab_mut(&mut self) -> &mut TabView {
        &mut self.tabs[self.current_tab]
    }

    pub fn controller(&self) -> Option<&TableController> {
        self.tab().state.controller()
    }

    pub fn controller_mut(&mut self) -> Option<&mut TableController> {
        self.tabs[self.current_tab].state.controller_mut()
    }

    /// The current view still needs its single fetch.
    pub fn needs_load(&self) -> bool {
        self.tab().state.is_loading()
    }

    /// Fetches the current view's rows. A failure becomes the view's error
    /// screen; there is no retry until `:reload`.
    pub fn load_current_view(&mut self) {
        let dataset = self.tab().dataset;
        let result = self.client.fetch_rows(dataset);
        let config = TableConfig::for_dataset(dataset);

        let message = match &result {
            Ok(rows) => format!("Loaded {} rows from {}", rows.len(), dataset.spec().route),
            Err(e) => format!("Failed to load {}: {e}", dataset.label()),
        };

        // New rows invalidate the old cursor position
        let tab = self.tab_mut();
        tab.state = ViewState::from_fetch(config, result);
        tab.reset_cursor();
        self.add_notification(message);
    }

    pub fn reload_current_view(&mut self) {
        // The event loop fetches on the next frame, after drawing the loading screen
        self.tab_mut().state = ViewState::Loading;
    }

    pub fn switch_to_tab(&mut self, index: usize) {
        if index < self.tabs.len() && index != self.current_tab {
            self.current_tab = index;
            self.add_notification(format!("Switched to {}", self.tab().config().title));
        }
    }

    pub fn next_tab(&mut self) {
        self.switch_to_tab((self.current_tab + 1) % self.tabs.len());
    }

    pub fn prev_tab(&mut self) {
        // Wrap around to the last tab
        let count = self.tabs.len();
        self.switch_to_tab((self.current_tab + count - 1) % count);
    }

    pub fn switch_to_dataset(&mut self, name: &str) {
        match name.parse::<Dataset>() {
            Ok(dataset) => {
                if let Some(index) = self.tabs.iter().position(|tab| tab.dataset == dataset) {
                    self.switch_to_tab(index);
                }
            }
            Err(e) => self.add_notification(e),
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();
        self.text_area = TextArea::default();
    }

    pub fn add_char_to_input(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn delete_char_from_input(&mut self) {
        self.input_buffer.pop();
    }

    pub fn start_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer = String::new();
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.input_mode = InputMode::Normal;
    }
}
