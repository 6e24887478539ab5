use serde::{Deserialize, Serialize};

use crate::core::stats::GridStats;
use crate::models::domain::OceanGrid;

/// Response for the ocean matrix endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MatrixResponse {
    pub grid: OceanGrid,
    pub raw_point_count: usize,
}

/// Response for the grid statistics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub stats: GridStats,
    pub neighborhood_averages: Vec<Vec<u8>>,
    pub raw_point_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
