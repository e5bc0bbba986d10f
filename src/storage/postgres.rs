//! PostgreSQL storage implementation

use crate::service::ServiceRecord;
use crate::storage::{StorageBackend, StorageError, StorageStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;

/// PostgreSQL storage implementation
pub struct PostgresStorage {
    /// Database connection pool
    pool: sqlx::PgPool,
}

impl PostgresStorage {
    /// Create a new PostgreSQL storage instance
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Connection error: {}", e),
            })?;

        Self::create_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Create database schema
    async fn create_schema(pool: &sqlx::PgPool) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS services (
                id TEXT PRIMARY KEY,
                application TEXT NOT NULL,
                location TEXT NOT NULL,
                port INTEGER NOT NULL,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_application ON services(application)")
            .execute(pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_services_endpoint ON services(location, port)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    fn record_from_row(row: &PgRow) -> Result<ServiceRecord, StorageError> {
        let port: i32 = row.try_get("port")?;
        let port = u16::try_from(port).map_err(|_| StorageError::InvalidRecord {
            message: format!("port out of range: {}", port),
        })?;

        let status: String = row.try_get("status")?;
        let status = status.parse().map_err(|_| StorageError::InvalidRecord {
            message: format!("unrecognized status in storage: {}", status),
        })?;

        Ok(ServiceRecord {
            id: row.try_get("id")?,
            application: row.try_get("application")?,
            location: row.try_get("location")?,
            port,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl StorageBackend for PostgresStorage {
    async fn upsert(&self, record: ServiceRecord) -> Result<ServiceRecord, StorageError> {
        let mut tx = self.pool.begin().await.map_err(|e| StorageError::Transaction {
            message: format!("failed to begin transaction: {}", e),
        })?;

        // Single combined lookup: the endpoint wins over a mismatched
        // caller-supplied id.
        let existing: Option<(String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, created_at FROM services WHERE id = $1 OR (location = $2 AND port = $3)",
        )
        .bind(&record.id)
        .bind(&record.location)
        .bind(i32::from(record.port))
        .fetch_optional(&mut *tx)
        .await?;

        let now = Utc::now();
        let saved = match existing {
            Some((id, created_at)) => {
                let saved = ServiceRecord {
                    id,
                    created_at,
                    updated_at: now,
                    ..record
                };
                sqlx::query(
                    r#"
                    UPDATE services SET
                        application = $1,
                        location = $2,
                        port = $3,
                        status = $4,
                        updated_at = $5
                    WHERE id = $6
                    "#,
                )
                .bind(&saved.application)
                .bind(&saved.location)
                .bind(i32::from(saved.port))
                .bind(saved.status.as_str())
                .bind(saved.updated_at)
                .bind(&saved.id)
                .execute(&mut *tx)
                .await?;
                saved
            }
            None => {
                let saved = ServiceRecord {
                    created_at: now,
                    updated_at: now,
                    ..record
                };
                sqlx::query(
                    r#"
                    INSERT INTO services (
                        id, application, location, port, status, created_at, updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(&saved.id)
                .bind(&saved.application)
                .bind(&saved.location)
                .bind(i32::from(saved.port))
                .bind(saved.status.as_str())
                .bind(saved.created_at)
                .bind(saved.updated_at)
                .execute(&mut *tx)
                .await?;
                saved
            }
        };

        tx.commit().await.map_err(|e| StorageError::Transaction {
            message: format!("failed to commit transaction: {}", e),
        })?;

        Ok(saved)
    }

    async fn find(&self, id: &str) -> Result<Option<ServiceRecord>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, application, location, port, status, created_at, updated_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<ServiceRecord>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, application, location, port, status, created_at, updated_at
            FROM services
            WHERE application = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(application)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }

    async fn stats(&self) -> Result<StorageStats, StorageError> {
        let (total, healthy, applications, last_activity): (i64, i64, i64, Option<DateTime<Utc>>) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'HEALTHY'),
                    COUNT(DISTINCT application),
                    MAX(updated_at)
                FROM services
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(StorageStats {
            total_services: total as u64,
            healthy_services: healthy as u64,
            applications: applications as u64,
            last_activity: last_activity.unwrap_or_else(Utc::now),
        })
    }

    async fn shutdown(&self) -> Result<(), StorageError> {
        self.pool.close().await;

        tracing::debug!("PostgreSQL storage shutdown completed");
        Ok(())
    }
}
