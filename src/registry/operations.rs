//! Service record operations
//!
//! This module contains the storage-facing operations for service records.

use crate::service::ServiceRecord;
use crate::storage::{StorageBackend, StorageError, StorageStats};
use std::sync::Arc;

/// Service operations handler
pub struct ServiceOperations {
    storage: Arc<dyn StorageBackend>,
}

impl ServiceOperations {
    /// Create a new service operations handler
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Insert or update a service record
    pub async fn save(&self, record: ServiceRecord) -> Result<ServiceRecord, StorageError> {
        self.storage.upsert(record).await
    }

    /// Retrieve a service record by id
    pub async fn find(&self, id: &str) -> Result<Option<ServiceRecord>, StorageError> {
        self.storage.find(id).await
    }

    /// List all records for an application
    pub async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<ServiceRecord>, StorageError> {
        self.storage.find_by_application(application).await
    }

    /// Get storage statistics
    pub async fn stats(&self) -> Result<StorageStats, StorageError> {
        self.storage.stats().await
    }
}
