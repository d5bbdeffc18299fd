//! Blocking client for the dashboard API, used by the terminal viewer.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::layout::LayoutDetail;
use crate::rows::Rows;

#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: Url,
    client: Client,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| DashboardError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DashboardError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn fetch_rows(&self, dataset: Dataset) -> Result<Rows> {
        let segments: Vec<&str> = dataset
            .spec()
            .route
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        self.get_json(self.endpoint(&segments)?)
    }

    pub fn fetch_layout(&self, name: &str) -> Result<LayoutDetail> {
        self.get_json(self.endpoint(&["api", "layouts", name])?)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "fetching");

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(DashboardError::Remote(error_message(status.as_u16(), &body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// The server's `error` field when the body carries one, otherwise a
/// generic message with the status code.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
