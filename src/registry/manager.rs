//! Service Registry Manager
//!
//! This module provides the main registry manager for coordinating
//! service record operations and managing the registry lifecycle.

use crate::config::ServiceRegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::metrics::MetricsCollector;
use crate::service::{ServiceRecord, ServiceRegistration, ServiceStatus};
use crate::storage::{MemoryStorage, PostgresStorage, SqliteStorage, StorageBackend};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    operations::ServiceOperations,
    state::{RegistryState, RegistryStats},
};

/// Service Registry Manager
///
/// Stateless orchestration over the storage backend: assigns identity,
/// applies the default status, and maps storage outcomes to the request
/// error taxonomy. Safe to share across concurrent requests.
pub struct ServiceRegistryManager {
    /// Configuration
    config: ServiceRegistryConfig,

    /// Storage backend
    storage: Arc<dyn StorageBackend>,

    /// Registry state
    state: Arc<RwLock<RegistryState>>,

    /// Service operations
    operations: ServiceOperations,

    /// Metrics collector
    metrics: MetricsCollector,
}

impl ServiceRegistryManager {
    /// Create a new service registry manager backed by memory storage
    pub fn new(config: ServiceRegistryConfig) -> Self {
        let storage: Arc<dyn StorageBackend> =
            Arc::new(MemoryStorage::new().expect("Failed to create memory storage"));
        let state = Arc::new(RwLock::new(RegistryState::new()));

        let operations = ServiceOperations::new(storage.clone());
        let metrics = MetricsCollector::new(crate::SERVICE_REGISTRY_NAME.to_string());

        Self {
            config,
            storage,
            state,
            operations,
            metrics,
        }
    }

    /// Create storage backend based on configuration
    async fn create_storage_backend(
        config: &ServiceRegistryConfig,
    ) -> RegistryResult<Arc<dyn StorageBackend>> {
        match config.storage.backend {
            crate::config::StorageBackendType::Memory => Ok(Arc::new(MemoryStorage::new()?)),
            crate::config::StorageBackendType::Postgres => {
                let storage = PostgresStorage::new(
                    &config.storage.postgres.url,
                    config.storage.max_connections,
                    config.storage.connection_timeout,
                )
                .await?;
                Ok(Arc::new(storage))
            }
            crate::config::StorageBackendType::Sqlite => {
                let storage = SqliteStorage::new(
                    config.storage.sqlite.database_path.clone(),
                    config.storage.max_connections,
                    config.storage.sqlite.enable_wal,
                )
                .await?;
                Ok(Arc::new(storage))
            }
        }
    }

    /// Create a new service registry manager with the configured storage backend
    pub async fn new_with_storage(config: ServiceRegistryConfig) -> RegistryResult<Self> {
        let storage = Self::create_storage_backend(&config).await?;
        let state = Arc::new(RwLock::new(RegistryState::new()));

        let operations = ServiceOperations::new(storage.clone());
        let metrics = MetricsCollector::new(crate::SERVICE_REGISTRY_NAME.to_string());

        Ok(Self {
            config,
            storage,
            state,
            operations,
            metrics,
        })
    }

    /// Initialize the registry
    pub async fn initialize(&self) -> RegistryResult<()> {
        // Validate configuration
        self.config
            .validate()
            .map_err(|e| RegistryError::config(&e))?;

        // Perform health check
        let healthy = self.storage.health_check().await?;

        // Update state
        {
            let mut state = self.state.write().await;
            state.mark_initialized();
            state.update_health(healthy);
        }

        Ok(())
    }

    /// Register a service instance
    ///
    /// Assigns a generated identifier when none is supplied and defaults the
    /// status to healthy. Re-registration at a known endpoint or id updates
    /// the existing record.
    pub async fn register(
        &self,
        registration: ServiceRegistration,
    ) -> RegistryResult<ServiceRecord> {
        Self::validate_registration(&registration)?;

        let id = match registration.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };
        let status = registration.status.unwrap_or(ServiceStatus::Healthy);

        let now = Utc::now();
        let record = ServiceRecord {
            id,
            application: registration.application,
            location: registration.location,
            port: registration.port,
            status,
            created_at: now,
            updated_at: now,
        };

        let saved = self.operations.save(record).await.map_err(|e| {
            RegistryError::storage(&format!("failed to save service registration: {}", e))
        })?;

        self.metrics.record_registration(saved.status.as_str());
        {
            let mut state = self.state.write().await;
            state.stats.track_registration();
        }

        tracing::debug!(
            "registered service {} for {} at {}",
            saved.id,
            saved.application,
            saved.endpoint()
        );
        Ok(saved)
    }

    /// Look up a service record by id
    pub async fn find(&self, id: &str) -> RegistryResult<ServiceRecord> {
        let record = self.operations.find(id).await.map_err(|e| {
            RegistryError::storage(&format!("failed to look up service(id={}): {}", id, e))
        })?;

        match record {
            Some(record) => {
                self.metrics.record_lookup(true);
                Ok(record)
            }
            None => {
                self.metrics.record_lookup(false);
                Err(RegistryError::ServiceNotFound(id.to_string()))
            }
        }
    }

    /// Record the status of a registered service
    ///
    /// A status transition on a service that was never registered is a
    /// precondition failure, not a not-found: the caller's assumed prior
    /// state is wrong.
    pub async fn set_status(&self, id: &str, status: ServiceStatus) -> RegistryResult<()> {
        let existing = self.operations.find(id).await.map_err(|e| {
            RegistryError::storage(&format!("failed to look up service(id={}): {}", id, e))
        })?;

        let mut record = match existing {
            Some(record) => record,
            None => {
                return Err(RegistryError::precondition_failed(&format!(
                    "cannot set status for unregistered service(id={})",
                    id
                )));
            }
        };

        record.status = status;
        self.operations.save(record).await.map_err(|e| {
            RegistryError::storage(&format!(
                "failed to save status update for service(id={}): {}",
                id, e
            ))
        })?;

        self.metrics.record_status_update(status.as_str());
        {
            let mut state = self.state.write().await;
            state.stats.track_status_update();
        }

        tracing::debug!("set status {} for service {}", status, id);
        Ok(())
    }

    /// Look up all services for an application
    ///
    /// When `only_healthy` is set the result is narrowed to records
    /// reporting healthy, preserving the store's insertion order. An unknown
    /// application yields an empty result.
    pub async fn find_application_services(
        &self,
        application: &str,
        only_healthy: bool,
    ) -> RegistryResult<Vec<ServiceRecord>> {
        let services = self
            .operations
            .find_by_application(application)
            .await
            .map_err(|e| {
                RegistryError::storage(&format!(
                    "failed to query services for application={}: {}",
                    application, e
                ))
            })?;

        self.metrics.record_discovery(application, services.len());

        if !only_healthy {
            return Ok(services);
        }

        Ok(services.into_iter().filter(|s| s.is_healthy()).collect())
    }

    /// Health check
    pub async fn health_check(&self) -> RegistryResult<bool> {
        let healthy = self.storage.health_check().await?;

        {
            let mut state = self.state.write().await;
            state.update_health(healthy);
        }

        Ok(healthy)
    }

    /// Get registry statistics
    pub async fn get_stats(&self) -> RegistryResult<RegistryStats> {
        let storage_stats = self
            .operations
            .stats()
            .await
            .map_err(|e| RegistryError::storage(&format!("failed to collect stats: {}", e)))?;

        let mut state = self.state.write().await;
        state.stats.total_services = storage_stats.total_services;
        state.stats.healthy_services = storage_stats.healthy_services;
        state.stats.applications = storage_stats.applications;

        let stats = state.stats.clone();
        self.metrics.update_registry_stats(&stats);
        Ok(stats)
    }

    /// Get the registry state
    pub async fn get_state(&self) -> RegistryState {
        self.state.read().await.clone()
    }

    /// Get the registry configuration
    pub fn get_config(&self) -> &ServiceRegistryConfig {
        &self.config
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Shutdown the registry manager
    pub async fn shutdown(&self) -> RegistryResult<()> {
        self.storage.shutdown().await?;
        Ok(())
    }

    fn validate_registration(registration: &ServiceRegistration) -> RegistryResult<()> {
        if registration.application.trim().is_empty() {
            return Err(RegistryError::validation("application is required"));
        }
        if registration.location.trim().is_empty() {
            return Err(RegistryError::validation("location is required"));
        }
        if registration.port == 0 {
            return Err(RegistryError::validation("port is required"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ServiceRegistryManager {
        ServiceRegistryManager::new(ServiceRegistryConfig::default())
    }

    fn registration(application: &str, location: &str, port: u16) -> ServiceRegistration {
        ServiceRegistration::new(application.to_string(), location.to_string(), port)
    }

    #[tokio::test]
    async fn test_register_assigns_id_and_default_status() {
        let manager = manager();

        let saved = manager
            .register(registration("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        assert!(!saved.id.is_empty());
        assert_eq!(saved.status, ServiceStatus::Healthy);
    }

    #[tokio::test]
    async fn test_register_keeps_supplied_id_and_status() {
        let manager = manager();

        let saved = manager
            .register(
                registration("chat", "10.0.0.4", 8080)
                    .with_id("svc-1".to_string())
                    .with_status(ServiceStatus::Unhealthy),
            )
            .await
            .unwrap();

        assert_eq!(saved.id, "svc-1");
        assert_eq!(saved.status, ServiceStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_register_validates_required_fields() {
        let manager = manager();

        let err = manager
            .register(registration("", "10.0.0.4", 8080))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation { .. }));

        let err = manager
            .register(registration("chat", "", 8080))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation { .. }));

        let err = manager
            .register(registration("chat", "10.0.0.4", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_reregistration_preserves_identity() {
        let manager = manager();

        let first = manager
            .register(registration("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        // Same endpoint, different caller-supplied id: the endpoint wins.
        let second = manager
            .register(
                registration("chat", "10.0.0.4", 8080)
                    .with_id("other-id".to_string())
                    .with_status(ServiceStatus::Unhealthy),
            )
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.status, ServiceStatus::Unhealthy);

        let services = manager
            .find_application_services("chat", false)
            .await
            .unwrap();
        assert_eq!(services.len(), 1);
    }

    #[tokio::test]
    async fn test_find_unknown_service() {
        let manager = manager();

        let err = manager.find("no-such-id").await.unwrap_err();
        assert!(matches!(err, RegistryError::ServiceNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_status_requires_registration() {
        let manager = manager();

        let err = manager
            .set_status("no-such-id", ServiceStatus::Unhealthy)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::PreconditionFailed { .. }));
    }

    #[tokio::test]
    async fn test_set_status_updates_only_status() {
        let manager = manager();

        let saved = manager
            .register(registration("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        manager
            .set_status(&saved.id, ServiceStatus::Unhealthy)
            .await
            .unwrap();

        let found = manager.find(&saved.id).await.unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.status, ServiceStatus::Unhealthy);
        assert_eq!(found.created_at, saved.created_at);
        assert!(found.updated_at >= saved.updated_at);
    }

    #[tokio::test]
    async fn test_discovery_filters_unhealthy() {
        let manager = manager();

        manager
            .register(registration("chat", "10.0.0.4", 8080))
            .await
            .unwrap();
        manager
            .register(
                registration("chat", "10.0.0.5", 8080).with_status(ServiceStatus::Unhealthy),
            )
            .await
            .unwrap();
        manager
            .register(registration("chat", "10.0.0.6", 8080))
            .await
            .unwrap();

        let healthy = manager
            .find_application_services("chat", true)
            .await
            .unwrap();
        let locations: Vec<&str> = healthy.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(locations, vec!["10.0.0.4", "10.0.0.6"]);

        let all = manager
            .find_application_services("chat", false)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_discovery_unknown_application() {
        let manager = manager();

        let services = manager
            .find_application_services("search", true)
            .await
            .unwrap();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let manager = manager();

        manager
            .register(registration("chat", "10.0.0.4", 8080))
            .await
            .unwrap();
        manager
            .register(registration("billing", "10.0.0.9", 9090))
            .await
            .unwrap();

        let stats = manager.get_stats().await.unwrap();
        assert_eq!(stats.total_services, 2);
        assert_eq!(stats.applications, 2);
        assert_eq!(stats.registrations, 2);
    }
}
