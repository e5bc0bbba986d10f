//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Storage backends for the Service Registry
//!
//! This module provides storage abstractions and implementations for
//! persisting service records in the registry.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod sqlite;

#[cfg(test)]
mod tests;

use crate::service::ServiceRecord;
use async_trait::async_trait;

/// Storage backend trait
///
/// The sole owner of durable state. Absence of a record is signalled as
/// `Ok(None)`, distinct from storage failures, so the registry layer can
/// map it to not-found or precondition-failed per operation.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Insert or update a service record
    ///
    /// Identity is resolved within a single transaction: a record matching
    /// the input's id, or registered at the input's endpoint, is updated
    /// under its existing id with its original creation timestamp; otherwise
    /// a new record is inserted. Returns the persisted record.
    async fn upsert(&self, record: ServiceRecord) -> Result<ServiceRecord, StorageError>;

    /// Retrieve a service record by id
    async fn find(&self, id: &str) -> Result<Option<ServiceRecord>, StorageError>;

    /// List all records for an application, in insertion order
    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<ServiceRecord>, StorageError>;

    /// Health check
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Get storage statistics
    async fn stats(&self) -> Result<StorageStats, StorageError>;

    /// Shutdown the storage backend
    async fn shutdown(&self) -> Result<(), StorageError>;
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageStats {
    /// Total number of service records
    pub total_services: u64,

    /// Number of records reporting healthy
    pub healthy_services: u64,

    /// Number of distinct applications
    pub applications: u64,

    /// Last activity timestamp
    pub last_activity: chrono::DateTime<chrono::Utc>,
}

// Re-export storage implementations
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use sqlite::SqliteStorage;
