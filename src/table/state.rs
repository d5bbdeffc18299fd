use crate::error::DashboardError;
use crate::rows::Rows;
use crate::table::config::TableConfig;
use crate::table::controller::TableController;

/// Lifecycle of one view: a single fetch, no retry.
#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready(TableController),
}

impl ViewState {
    pub fn from_fetch(config: TableConfig, result: Result<Rows, DashboardError>) -> Self {
        match result {
            Ok(rows) => ViewState::Ready(TableController::new(config, rows)),
            Err(err) => ViewState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn controller(&self) -> Option<&TableController> {
        match self {
            ViewState::Ready(controller) => Some(controller),
            _ => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut TableController> {
        match self {
            ViewState::Ready(controller) => Some(controller),
            _ => None,
        }
    }
}
