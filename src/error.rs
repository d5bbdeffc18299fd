use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Excel file not found: {}", .0.display())]
    WorkbookNotFound(PathBuf),

    #[error("Unable to read Excel file: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("{label} sheet not found")]
    SheetNotFound {
        label: &'static str,
        available: Vec<String>,
    },

    #[error("No data found in {0} sheet")]
    EmptySheet(String),

    #[error("Layout \"{0}\" not found")]
    LayoutNotFound(String),

    /// An error message reported by the dashboard server.
    #[error("{0}")]
    Remote(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
