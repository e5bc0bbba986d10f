//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration management for the Service Registry
//!
//! This module provides configuration structures and validation for
//! the service registry service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Service Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRegistryConfig {
    /// Configuration version
    pub version: String,

    /// Storage configuration
    pub storage: StorageConfig,

    /// API configuration
    pub api: ApiConfig,

    /// Monitoring configuration
    pub monitoring: MonitoringConfig,
}

impl Default for ServiceRegistryConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            storage: StorageConfig::default(),
            api: ApiConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: StorageBackendType,

    /// Maximum number of connections
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// PostgreSQL specific configuration
    pub postgres: PostgresConfig,

    /// SQLite specific configuration
    pub sqlite: SqliteConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Memory,
            max_connections: 10,
            connection_timeout: 30,
            postgres: PostgresConfig::default(),
            sqlite: SqliteConfig::default(),
        }
    }
}

/// PostgreSQL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Database URL
    pub url: String,

    /// Database name
    pub database: String,

    /// Username
    pub username: String,

    /// Host
    pub host: String,

    /// Port
    pub port: u16,

    /// SSL mode
    pub ssl_mode: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost:5432/service_registry".to_string(),
            database: "service_registry".to_string(),
            username: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            ssl_mode: "disable".to_string(),
        }
    }
}

/// SQLite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Database path
    pub database_path: PathBuf,

    /// Enable WAL mode
    pub enable_wal: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("service_registry.db"),
            enable_wal: true,
        }
    }
}

/// Storage backend types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// In-memory storage (for testing)
    Memory,

    /// SQLite storage
    Sqlite,

    /// PostgreSQL storage
    Postgres,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host
    pub host: String,

    /// API port
    pub port: u16,

    /// API base path
    pub base_path: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_path: "/v1".to_string(),
            request_timeout: 30,
            enable_cors: true,
        }
    }
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Log level
    pub log_level: String,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logs
    Json,

    /// Human-readable text logs
    Text,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

impl ServiceRegistryConfig {
    /// Load configuration from file
    pub fn from_file(path: &PathBuf) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("SERVICE_REGISTRY"))
            .build()?;

        settings.try_deserialize().map_err(|e| {
            // Enhance error message with config file path for common error types
            match e {
                config::ConfigError::NotFound(key) => config::ConfigError::NotFound(format!(
                    "{} (in config file: {})",
                    key,
                    path.display()
                )),
                config::ConfigError::FileParse { uri, cause } => config::ConfigError::FileParse {
                    uri: Some(format!(
                        "{} (config file: {})",
                        uri.as_deref().unwrap_or("unknown"),
                        path.display()
                    )),
                    cause,
                },
                _ => e,
            }
        })
    }

    /// Load configuration from multiple sources with precedence
    pub fn from_sources(
        config_file: Option<&PathBuf>,
        env_prefix: &str,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add defaults first
        builder = builder.add_source(config::File::from_str(
            &Self::generate_example(),
            config::FileFormat::Toml,
        ));

        // Add config file if provided
        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }

        // Add environment variables with separator
        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        settings.try_deserialize()
    }

    /// Load configuration with defaults
    pub fn load_with_defaults() -> Result<Self, config::ConfigError> {
        // Try to load from common config file locations
        let config_paths = vec![
            PathBuf::from("config/service-registry.toml"),
            PathBuf::from("service-registry.toml"),
            PathBuf::from("config/service-registry.yaml"),
            PathBuf::from("service-registry.yaml"),
        ];

        for path in config_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // If no config file found, load from environment variables with defaults
        Self::from_sources(None, "SERVICE_REGISTRY")
    }

    /// Generate example configuration
    pub fn generate_example() -> String {
        r#"# Service Registry Configuration Example
# This file shows all available configuration options

version = "1.0.0"

[storage]
# Storage backend type: Memory, Sqlite, Postgres
backend = "Memory"
max_connections = 10
connection_timeout = 30

[storage.postgres]
url = "postgresql://localhost:5432/service_registry"
database = "service_registry"
username = "postgres"
host = "localhost"
port = 5432
ssl_mode = "disable"

[storage.sqlite]
database_path = "service_registry.db"
enable_wal = true

[api]
host = "0.0.0.0"
port = 8080
base_path = "/v1"
request_timeout = 30
enable_cors = true

[monitoring]
enable_metrics = true
log_level = "info"
log_format = "text"
"#
        .to_string()
    }

    /// Validate configuration with detailed error reporting
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        self.validate_storage(&mut errors);
        self.validate_api(&mut errors);
        self.validate_monitoring(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Configuration validation failed with {} error(s):\n{}",
                errors.len(),
                errors.join("\n")
            ))
        }
    }

    /// Validate storage configuration
    fn validate_storage(&self, errors: &mut Vec<String>) {
        if self.storage.max_connections == 0 {
            errors.push("storage.max_connections: must be greater than 0".to_string());
        }

        if self.storage.connection_timeout == 0 {
            errors.push("storage.connection_timeout: must be greater than 0".to_string());
        }

        match self.storage.backend {
            StorageBackendType::Postgres => {
                self.validate_postgres_config(errors);
            }
            StorageBackendType::Sqlite => {
                self.validate_sqlite_config(errors);
            }
            StorageBackendType::Memory => {
                // Memory backend doesn't need additional validation
            }
        }
    }

    /// Validate PostgreSQL configuration
    fn validate_postgres_config(&self, errors: &mut Vec<String>) {
        let pg = &self.storage.postgres;

        if pg.url.is_empty() {
            errors.push("storage.postgres.url: cannot be empty".to_string());
        }

        if pg.database.is_empty() {
            errors.push("storage.postgres.database: cannot be empty".to_string());
        }

        if pg.username.is_empty() {
            errors.push("storage.postgres.username: cannot be empty".to_string());
        }

        if pg.host.is_empty() {
            errors.push("storage.postgres.host: cannot be empty".to_string());
        }

        if pg.port == 0 {
            errors.push("storage.postgres.port: must be greater than 0".to_string());
        }

        let valid_ssl_modes = ["disable", "require", "verify-ca", "verify-full"];
        if !valid_ssl_modes.contains(&pg.ssl_mode.as_str()) {
            errors.push(format!(
                "storage.postgres.ssl_mode: must be one of {:?}",
                valid_ssl_modes
            ));
        }
    }

    /// Validate SQLite configuration
    fn validate_sqlite_config(&self, errors: &mut Vec<String>) {
        if self.storage.sqlite.database_path.as_os_str().is_empty() {
            errors.push("storage.sqlite.database_path: cannot be empty".to_string());
        }
    }

    /// Validate API configuration
    fn validate_api(&self, errors: &mut Vec<String>) {
        if self.api.host.is_empty() {
            errors.push("api.host: cannot be empty".to_string());
        }

        if self.api.port == 0 {
            errors.push("api.port: must be greater than 0".to_string());
        }

        if self.api.base_path.is_empty() {
            errors.push("api.base_path: cannot be empty".to_string());
        }

        if self.api.request_timeout == 0 {
            errors.push("api.request_timeout: must be greater than 0".to_string());
        }
    }

    /// Validate monitoring configuration
    fn validate_monitoring(&self, errors: &mut Vec<String>) {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.monitoring.log_level.as_str()) {
            errors.push(format!(
                "monitoring.log_level: must be one of {:?}",
                valid_log_levels
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceRegistryConfig::default();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.storage.backend, StorageBackendType::Memory);
        assert!(config.monitoring.enable_metrics);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServiceRegistryConfig::default();
        assert!(config.validate().is_ok());

        // Test invalid port
        config.api.port = 0;
        assert!(config.validate().is_err());

        // Test invalid log level
        config.api.port = 8080;
        config.monitoring.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                &ServiceRegistryConfig::generate_example(),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: ServiceRegistryConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.storage.backend, StorageBackendType::Memory);
        assert_eq!(config.api.base_path, "/v1");
    }
}
