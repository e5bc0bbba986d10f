//! API request structures
//!
//! This module contains all the request structures for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::service::ServiceStatus;

/// Register service request
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterServiceRequest {
    /// Caller-supplied service identifier, if any
    #[serde(default)]
    pub id: Option<String>,

    /// Logical application name
    pub application: String,

    /// Host or address where the instance is reachable
    pub location: String,

    /// Endpoint port
    pub port: u16,

    /// Reported health status, if any
    #[serde(default)]
    pub status: Option<ServiceStatus>,
}

/// List services query parameters
#[derive(Debug, Serialize, Deserialize)]
pub struct ListServicesQuery {
    /// Logical application name
    pub application: Option<String>,

    /// Narrow the result to healthy instances (defaults to true)
    #[serde(rename = "only-healthy")]
    pub only_healthy: Option<bool>,
}
