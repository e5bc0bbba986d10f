//! Storage tests

use super::*;
use crate::service::{ServiceRecord, ServiceStatus};

fn record(application: &str, location: &str, port: u16) -> ServiceRecord {
    ServiceRecord::new(
        application.to_string(),
        location.to_string(),
        port,
        ServiceStatus::Healthy,
    )
}

async fn assert_registry_semantics(storage: &dyn StorageBackend) {
    // First registration inserts.
    let first = storage
        .upsert(record("chat", "10.0.0.4", 8080))
        .await
        .unwrap();
    assert_eq!(first.created_at, first.updated_at);

    // Re-registering the same endpoint under a different id resolves to the
    // existing record: one record per endpoint, original id preserved.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let mut second = record("chat", "10.0.0.4", 8080);
    second.status = ServiceStatus::Unhealthy;
    let saved = storage.upsert(second).await.unwrap();

    assert_eq!(saved.id, first.id);
    assert_eq!(saved.status, ServiceStatus::Unhealthy);
    assert_eq!(saved.created_at, first.created_at);
    assert!(saved.updated_at > first.updated_at);

    let services = storage.find_by_application("chat").await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, first.id);

    // Registering under the existing id but a new endpoint moves the record.
    let mut moved = record("chat", "10.0.0.5", 8080);
    moved.id = first.id.clone();
    let saved = storage.upsert(moved).await.unwrap();
    assert_eq!(saved.id, first.id);
    assert_eq!(saved.location, "10.0.0.5");

    let services = storage.find_by_application("chat").await.unwrap();
    assert_eq!(services.len(), 1);
}

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_creation() {
        let storage = MemoryStorage::new();
        assert!(storage.is_ok());
    }

    #[tokio::test]
    async fn test_upsert_semantics() {
        let storage = MemoryStorage::new().unwrap();
        assert_registry_semantics(&storage).await;
    }

    #[tokio::test]
    async fn test_find() {
        let storage = MemoryStorage::new().unwrap();

        let saved = storage
            .upsert(record("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        let found = storage.find(&saved.id).await.unwrap();
        assert_eq!(found, Some(saved));

        let missing = storage.find("no-such-id").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_application_order() {
        let storage = MemoryStorage::new().unwrap();

        for port in [8080u16, 8081, 8082] {
            storage
                .upsert(record("chat", "10.0.0.4", port))
                .await
                .unwrap();
        }
        storage
            .upsert(record("billing", "10.0.0.9", 9090))
            .await
            .unwrap();

        let services = storage.find_by_application("chat").await.unwrap();
        let ports: Vec<u16> = services.iter().map(|s| s.port).collect();
        assert_eq!(ports, vec![8080, 8081, 8082]);

        let unknown = storage.find_by_application("search").await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_reregistration() {
        let storage = MemoryStorage::new().unwrap();

        let first = storage
            .upsert(record("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        let mut latest = first.clone();
        for _ in 0..3 {
            latest = storage.upsert(latest.clone()).await.unwrap();
        }

        let services = storage.find_by_application("chat").await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(latest.id, first.id);
        assert_eq!(latest.created_at, first.created_at);
        assert!(latest.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_stats() {
        let storage = MemoryStorage::new().unwrap();

        storage
            .upsert(record("chat", "10.0.0.4", 8080))
            .await
            .unwrap();
        let mut unhealthy = record("chat", "10.0.0.5", 8080);
        unhealthy.status = ServiceStatus::Unhealthy;
        storage.upsert(unhealthy).await.unwrap();
        storage
            .upsert(record("billing", "10.0.0.9", 9090))
            .await
            .unwrap();

        let stats = storage.stats().await.unwrap();
        assert_eq!(stats.total_services, 3);
        assert_eq!(stats.healthy_services, 2);
        assert_eq!(stats.applications, 2);
    }

    #[tokio::test]
    async fn test_health_check() {
        let storage = MemoryStorage::new().unwrap();
        let healthy = storage.health_check().await.unwrap();
        assert!(healthy);
    }
}

#[cfg(test)]
mod sqlite_tests {
    use super::*;
    use std::path::PathBuf;

    async fn memory_backed() -> SqliteStorage {
        SqliteStorage::new(PathBuf::from(":memory:"), 4, false)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_storage_creation() {
        let storage = memory_backed().await;
        assert!(storage.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_semantics() {
        let storage = memory_backed().await;
        assert_registry_semantics(&storage).await;
    }

    #[tokio::test]
    async fn test_find_roundtrip() {
        let storage = memory_backed().await;

        let saved = storage
            .upsert(record("chat", "10.0.0.4", 8080))
            .await
            .unwrap();

        let found = storage.find(&saved.id).await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.application, "chat");
        assert_eq!(found.location, "10.0.0.4");
        assert_eq!(found.port, 8080);
        assert_eq!(found.status, ServiceStatus::Healthy);

        assert!(storage.find("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_application_order() {
        let storage = memory_backed().await;

        for port in [8080u16, 8081, 8082] {
            storage
                .upsert(record("chat", "10.0.0.4", port))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let services = storage.find_by_application("chat").await.unwrap();
        let ports: Vec<u16> = services.iter().map(|s| s.port).collect();
        assert_eq!(ports, vec![8080, 8081, 8082]);

        let unknown = storage.find_by_application("search").await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let storage = memory_backed().await;

        storage
            .upsert(record("chat", "10.0.0.4", 8080))
            .await
            .unwrap();
        let mut unhealthy = record("chat", "10.0.0.5", 8080);
        unhealthy.status = ServiceStatus::Unhealthy;
        storage.upsert(unhealthy).await.unwrap();

        let stats = storage.stats().await.unwrap();
        assert_eq!(stats.total_services, 2);
        assert_eq!(stats.healthy_services, 1);
        assert_eq!(stats.applications, 1);
    }
}
