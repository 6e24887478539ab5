use crate::models::{BoundingBox, OccurrencePoint};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Public OBIS v3 API
pub const DEFAULT_OBIS_ENDPOINT: &str = "https://api.obis.org/v3";

/// Upstream record cap per query
pub const DEFAULT_RESULT_SIZE: u32 = 500;

/// Errors that can occur when querying OBIS
#[derive(Debug, Error)]
pub enum ObisError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Occurrence search response; only `results` is consumed
#[derive(Debug, Deserialize)]
struct OccurrenceResponse {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    results: Vec<OccurrencePoint>,
}

/// OBIS (Ocean Biodiversity Information System) occurrence client
///
/// Supplies the raw species records for a bounding box. `fetch` never fails:
/// any upstream problem is logged and reported as zero records.
#[derive(Debug, Clone)]
pub struct ObisClient {
    base_url: String,
    result_size: u32,
    client: Client,
}

impl ObisClient {
    /// Create a new OBIS client
    pub fn new(base_url: String, result_size: u32, timeout: Duration) -> Result<Self, ObisError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            result_size,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn result_size(&self) -> u32 {
        self.result_size
    }

    /// Fetch occurrence records inside `bounds`, or none if OBIS is unavailable
    pub async fn fetch(&self, bounds: &BoundingBox) -> Vec<OccurrencePoint> {
        match self.try_fetch(bounds).await {
            Ok(points) => points,
            Err(e) => {
                tracing::warn!("Error fetching OBIS data, continuing with no records: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch occurrence records inside `bounds`
    pub async fn try_fetch(&self, bounds: &BoundingBox) -> Result<Vec<OccurrencePoint>, ObisError> {
        let url = format!("{}/occurrence", self.base_url.trim_end_matches('/'));
        let geometry = bounds.to_wkt_polygon();

        tracing::debug!("Fetching occurrences from {} for {}", url, geometry);

        let response = self
            .client
            .get(&url)
            .query(&[("geometry", geometry.as_str())])
            .query(&[("size", self.result_size)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::debug!("OBIS occurrence query failed: {} - {}", status, body);
            return Err(ObisError::ApiError(format!(
                "Failed to query occurrences: {}",
                status
            )));
        }

        let body = response.text().await?;
        let parsed: OccurrenceResponse = serde_json::from_str(&body)
            .map_err(|e| ObisError::InvalidResponse(format!("Failed to parse occurrences: {}", e)))?;

        tracing::debug!(
            "Received {} occurrences (total: {})",
            parsed.results.len(),
            parsed.total.unwrap_or(0)
        );

        Ok(parsed.results)
    }
}
