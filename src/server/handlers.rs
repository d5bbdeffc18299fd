use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use super::AppState;
use super::response::api_error_response;
use crate::dataset::{Dataset, load_rows};
use crate::error::DashboardError;
use crate::layout::{LayoutDetail, find_layout};
use crate::rows::Rows;

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn load_blocking(state: &AppState, dataset: Dataset) -> Result<Rows, DashboardError> {
    let path = state.config.workbook_path.clone();
    let options = state.config.normalize;

    tokio::task::spawn_blocking(move || load_rows(&path, dataset, options))
        .await
        .map_err(|err| DashboardError::Io(std::io::Error::other(err)))?
}

fn log_failure(dataset: Dataset, err: &DashboardError) {
    match err {
        DashboardError::Workbook(_) | DashboardError::Io(_) => {
            error!(dataset = %dataset, error = %err, "failed to read workbook")
        }
        _ => warn!(dataset = %dataset, error = %err, "dataset unavailable"),
    }
}

pub(crate) async fn rows_handler(state: AppState, dataset: Dataset) -> Response {
    let started = Instant::now();

    match load_blocking(&state, dataset).await {
        Ok(rows) => {
            info!(
                dataset = %dataset,
                rows = rows.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "served dataset"
            );
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(err) => {
            log_failure(dataset, &err);
            api_error_response(dataset, &err)
        }
    }
}

pub(crate) async fn layout_detail_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let rows = match load_blocking(&state, Dataset::Layouts).await {
        Ok(rows) => rows,
        Err(err) => {
            log_failure(Dataset::Layouts, &err);
            return api_error_response(Dataset::Layouts, &err);
        }
    };

    match find_layout(&rows, &name) {
        Some(row) => {
            info!(layout = %name, "served layout detail");
            (StatusCode::OK, Json(LayoutDetail::from_row(row.clone()))).into_response()
        }
        None => {
            let err = DashboardError::LayoutNotFound(name);
            warn!(error = %err, "unknown layout");
            api_error_response(Dataset::Layouts, &err)
        }
    }
}
