//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Service Registry
//!
//! This crate provides a directory service that lets distributed
//! application instances announce their network location and health, and
//! lets other components discover the currently healthy instances of a
//! given application.

#[cfg(feature = "http")]
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod service;
pub mod storage;

// Re-export main types
pub use client::RegistryClient;
pub use config::ServiceRegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use registry::{RegistryState, RegistryStats, ServiceRegistryManager};
pub use service::{ServiceRecord, ServiceRegistration, ServiceStatus};
pub use storage::{MemoryStorage, PostgresStorage, SqliteStorage, StorageBackend, StorageError};

/// Service Registry version
pub const SERVICE_REGISTRY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service Registry name
pub const SERVICE_REGISTRY_NAME: &str = "service-registry";

/// Initialize the service registry
pub async fn init_service_registry(
    config: ServiceRegistryConfig,
) -> RegistryResult<ServiceRegistry> {
    ServiceRegistry::new(config).await
}

/// Shutdown the service registry
pub async fn shutdown_service_registry(registry: ServiceRegistry) -> RegistryResult<()> {
    registry.shutdown().await
}

/// Service Registry
///
/// This provides a centralized directory for registering and discovering
/// service instances across a distributed deployment.
pub struct ServiceRegistry {
    /// Configuration
    config: ServiceRegistryConfig,
    /// Registry manager
    manager: ServiceRegistryManager,
}

impl ServiceRegistry {
    /// Create a new service registry with the configured storage backend
    pub async fn new(config: ServiceRegistryConfig) -> RegistryResult<Self> {
        let manager = ServiceRegistryManager::new_with_storage(config.clone()).await?;
        manager.initialize().await?;

        Ok(Self { config, manager })
    }

    /// Register a service instance
    pub async fn register(
        &self,
        registration: ServiceRegistration,
    ) -> RegistryResult<ServiceRecord> {
        self.manager.register(registration).await
    }

    /// Look up a service record by id
    pub async fn find(&self, id: &str) -> RegistryResult<ServiceRecord> {
        self.manager.find(id).await
    }

    /// Record the status of a registered service
    pub async fn set_status(&self, id: &str, status: ServiceStatus) -> RegistryResult<()> {
        self.manager.set_status(id, status).await
    }

    /// Look up all services for an application
    pub async fn find_application_services(
        &self,
        application: &str,
        only_healthy: bool,
    ) -> RegistryResult<Vec<ServiceRecord>> {
        self.manager
            .find_application_services(application, only_healthy)
            .await
    }

    /// Get registry statistics
    pub async fn get_stats(&self) -> RegistryResult<RegistryStats> {
        self.manager.get_stats().await
    }

    /// Health check
    pub async fn health_check(&self) -> RegistryResult<bool> {
        self.manager.health_check().await
    }

    /// Get the registry configuration
    pub fn config(&self) -> &ServiceRegistryConfig {
        &self.config
    }

    /// Get the registry manager
    pub fn manager(&self) -> &ServiceRegistryManager {
        &self.manager
    }

    /// Shutdown the service registry
    pub async fn shutdown(self) -> RegistryResult<()> {
        self.manager.shutdown().await?;

        tracing::info!("Service registry shutdown completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_service_registry_creation() {
        let config = ServiceRegistryConfig::default();
        let registry = ServiceRegistry::new(config).await;
        assert!(registry.is_ok());
    }

    #[tokio::test]
    async fn test_service_registry_health_check() {
        let config = ServiceRegistryConfig::default();
        let registry = ServiceRegistry::new(config).await.unwrap();
        let health = registry.health_check().await;
        assert!(health.is_ok());
        assert!(health.unwrap());
    }

    #[tokio::test]
    async fn test_service_registry_roundtrip() {
        let config = ServiceRegistryConfig::default();
        let registry = ServiceRegistry::new(config).await.unwrap();
        assert_eq!(
            registry.config().storage.backend,
            crate::config::StorageBackendType::Memory
        );

        let saved = registry
            .register(ServiceRegistration::new(
                "chat".to_string(),
                "10.0.0.4".to_string(),
                8080,
            ))
            .await
            .unwrap();

        let found = registry.find(&saved.id).await.unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_service_registry_shutdown() {
        let config = ServiceRegistryConfig::default();
        let registry = ServiceRegistry::new(config).await.unwrap();

        // Shutdown should complete successfully
        let shutdown_result = registry.shutdown().await;
        assert!(shutdown_result.is_ok());
    }
}
