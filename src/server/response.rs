use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::dataset::{Dataset, DatasetSpec};
use crate::error::DashboardError;

/// Maps a pipeline failure to the status the dataset's endpoint reports.
pub fn status_for(spec: &DatasetSpec, err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::WorkbookNotFound(_) if spec.missing_file_not_found => {
            StatusCode::NOT_FOUND
        }
        DashboardError::SheetNotFound { .. } if spec.missing_sheet_not_found => {
            StatusCode::NOT_FOUND
        }
        DashboardError::EmptySheet(_) | DashboardError::LayoutNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_body(err: &DashboardError) -> Value {
    match err {
        DashboardError::SheetNotFound { label, available } => json!({
            "error": err.to_string(),
            "availableSheets": available,
            "message": format!("Please add a sheet named \"{label}\" to your Excel file."),
        }),
        _ => json!({ "error": err.to_string() }),
    }
}

pub(crate) fn api_error_response(dataset: Dataset, err: &DashboardError) -> Response {
    let status = status_for(dataset.spec(), err);
    (status, Json(error_body(err))).into_response()
}
