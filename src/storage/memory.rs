//! In-memory storage implementation

use crate::service::ServiceRecord;
use crate::storage::{StorageBackend, StorageError, StorageStats};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation
///
/// Records are kept in insertion order. The write guard is the
/// transaction-equivalent: identity resolution and the write happen under
/// a single exclusive lock.
pub struct MemoryStorage {
    /// Service record storage, in insertion order
    records: Arc<RwLock<Vec<ServiceRecord>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            records: Arc::new(RwLock::new(Vec::new())),
        })
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn upsert(&self, record: ServiceRecord) -> Result<ServiceRecord, StorageError> {
        let mut records = self.records.write().await;
        let now = Utc::now();

        let existing = records.iter_mut().find(|r| {
            r.id == record.id || (r.location == record.location && r.port == record.port)
        });

        match existing {
            Some(found) => {
                // Endpoint wins over a mismatched caller-supplied id; the
                // record keeps its original identity and creation time.
                let saved = ServiceRecord {
                    id: found.id.clone(),
                    application: record.application,
                    location: record.location,
                    port: record.port,
                    status: record.status,
                    created_at: found.created_at,
                    updated_at: now,
                };
                *found = saved.clone();
                Ok(saved)
            }
            None => {
                let saved = ServiceRecord {
                    created_at: now,
                    updated_at: now,
                    ..record
                };
                records.push(saved.clone());
                Ok(saved)
            }
        }
    }

    async fn find(&self, id: &str) -> Result<Option<ServiceRecord>, StorageError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<ServiceRecord>, StorageError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.application == application)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(true)
    }

    async fn stats(&self) -> Result<StorageStats, StorageError> {
        let records = self.records.read().await;

        let healthy = records.iter().filter(|r| r.is_healthy()).count() as u64;
        let applications = records
            .iter()
            .map(|r| r.application.as_str())
            .collect::<HashSet<_>>()
            .len() as u64;
        let last_activity = records
            .iter()
            .map(|r| r.updated_at)
            .max()
            .unwrap_or_else(Utc::now);

        Ok(StorageStats {
            total_services: records.len() as u64,
            healthy_services: healthy,
            applications,
            last_activity,
        })
    }

    async fn shutdown(&self) -> Result<(), StorageError> {
        tracing::debug!("Memory storage shutdown completed");
        Ok(())
    }
}
