//! JSON API over the workbook. Every request re-reads the file, so edits to
//! the workbook show up on the next request without a restart.

mod handlers;
mod response;

pub use response::{error_body, status_for};

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tracing::info;

use crate::config::DashboardConfig;
use crate::dataset::DATASETS;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let router = DATASETS.iter().fold(
        Router::new().route("/healthz", get(handlers::healthz_handler)),
        |router, spec| {
            let dataset = spec.dataset;
            router.route(
                spec.route,
                get(move |State(state): State<AppState>| {
                    handlers::rows_handler(state, dataset)
                }),
            )
        },
    );

    router
        .route("/api/layouts/:name", get(handlers::layout_detail_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: DashboardConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr;
    let workbook = config.workbook_path.clone();

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        workbook = %workbook.display(),
        "dashboard API listening"
    );

    axum::serve(listener, build_router(AppState::new(config))).await?;
    Ok(())
}
