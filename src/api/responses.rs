//! API response structures
//!
//! This module contains all the response structures for the API endpoints.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,

    /// Response timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Whether registry is initialized
    pub initialized: bool,

    /// Last health check timestamp
    pub last_health_check: chrono::DateTime<chrono::Utc>,
}

/// Set status response
#[derive(Debug, Serialize, Deserialize)]
pub struct SetStatusResponse {
    /// Response message
    pub message: String,
}

/// Stats response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Registry statistics
    pub stats: crate::registry::RegistryStats,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type
    pub error: String,

    /// Error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}
