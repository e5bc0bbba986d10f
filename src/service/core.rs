//! Core service record functionality
//!
//! This module contains the service record struct and the registration
//! input it is resolved from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::ServiceStatus;

/// Directory entry for one reachable application instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Unique service identifier, immutable once assigned
    pub id: String,

    /// Logical application name, shared by all instances of an application
    pub application: String,

    /// Host or address where the instance is reachable
    pub location: String,

    /// Endpoint port
    pub port: u16,

    /// Latest reported health status
    pub status: ServiceStatus,

    /// Creation timestamp, server-assigned
    pub created_at: DateTime<Utc>,

    /// Last modified timestamp, server-assigned
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Create a new service record with a generated identifier
    pub fn new(application: String, location: String, port: u16, status: ServiceStatus) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            application,
            location,
            port,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the endpoint the record identifies
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.location, self.port)
    }

    /// Check if the record reports a healthy instance
    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

/// Registration input for a service instance
///
/// `id` and `status` are optional; the registry assigns an identifier and
/// defaults the status to healthy when they are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRegistration {
    /// Caller-supplied identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Logical application name
    pub application: String,

    /// Host or address where the instance is reachable
    pub location: String,

    /// Endpoint port
    pub port: u16,

    /// Reported health status, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
}

impl ServiceRegistration {
    /// Create a registration for an endpoint
    pub fn new(application: String, location: String, port: u16) -> Self {
        Self {
            id: None,
            application,
            location,
            port,
            status: None,
        }
    }

    /// Set the caller-supplied identifier
    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the reported status
    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = ServiceRecord::new(
            "chat".to_string(),
            "10.0.0.4".to_string(),
            8080,
            ServiceStatus::Healthy,
        );

        assert!(!record.id.is_empty());
        assert_eq!(record.endpoint(), "10.0.0.4:8080");
        assert!(record.is_healthy());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ServiceRecord::new(
            "chat".to_string(),
            "10.0.0.4".to_string(),
            8080,
            ServiceStatus::Healthy,
        );
        let b = ServiceRecord::new(
            "chat".to_string(),
            "10.0.0.4".to_string(),
            8080,
            ServiceStatus::Healthy,
        );

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_registration_builder() {
        let registration = ServiceRegistration::new("chat".to_string(), "10.0.0.4".to_string(), 8080)
            .with_id("svc-1".to_string())
            .with_status(ServiceStatus::Unhealthy);

        assert_eq!(registration.id.as_deref(), Some("svc-1"));
        assert_eq!(registration.status, Some(ServiceStatus::Unhealthy));
    }
}
