//! Service status enumeration
//!
//! This module contains the health status reported by service instances.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Health status of a registered service instance
///
/// Status is reported by clients, not probed; the registry records the
/// latest reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    /// Service is reachable and serving traffic
    Healthy,

    /// Service has reported itself as not serving traffic
    Unhealthy,
}

impl ServiceStatus {
    /// Get the wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Healthy => "HEALTHY",
            ServiceStatus::Unhealthy => "UNHEALTHY",
        }
    }

    /// Check if the status is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceStatus::Healthy)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HEALTHY" => Ok(ServiceStatus::Healthy),
            "UNHEALTHY" => Ok(ServiceStatus::Unhealthy),
            _ => Err(RegistryError::validation(&format!(
                "unrecognized service status: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "HEALTHY".parse::<ServiceStatus>().unwrap(),
            ServiceStatus::Healthy
        );
        assert_eq!(
            "unhealthy".parse::<ServiceStatus>().unwrap(),
            ServiceStatus::Unhealthy
        );
        assert!("STARTING".parse::<ServiceStatus>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ServiceStatus::Healthy.to_string(), "HEALTHY");
        assert_eq!(ServiceStatus::Unhealthy.to_string(), "UNHEALTHY");
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&ServiceStatus::Healthy).unwrap();
        assert_eq!(json, "\"HEALTHY\"");

        let status: ServiceStatus = serde_json::from_str("\"UNHEALTHY\"").unwrap();
        assert_eq!(status, ServiceStatus::Unhealthy);
    }
}
