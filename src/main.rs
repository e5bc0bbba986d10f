//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Service Registry main binary
//!
//! This binary provides the service registry server and a command line
//! client for a running instance.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_registry::{
    config::{LogFormat, StorageBackendType},
    RegistryClient, ServiceRegistration, ServiceRegistryConfig, ServiceRegistryManager,
    ServiceStatus, SERVICE_REGISTRY_VERSION,
};

#[derive(Parser)]
#[command(name = "service-registry")]
#[command(about = "Service Registry Server")]
#[command(version = SERVICE_REGISTRY_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the service registry server
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/service-registry.toml")]
        config: PathBuf,

        /// API host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// API port
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Storage backend type
        #[arg(long)]
        storage: Option<String>,

        /// Database URL (postgres) or path (sqlite)
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Register a service instance
    Register {
        /// Logical application name
        #[arg(short, long)]
        application: String,

        /// Host or address where the instance is reachable
        #[arg(short, long)]
        location: String,

        /// Endpoint port
        #[arg(short, long)]
        port: u16,

        /// Service identifier, generated when omitted
        #[arg(long)]
        id: Option<String>,

        /// Reported status, defaults to HEALTHY
        #[arg(long)]
        status: Option<String>,

        /// API endpoint
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,
    },

    /// Get a service record
    Get {
        /// Service identifier
        #[arg(short, long)]
        id: String,

        /// API endpoint
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,
    },

    /// List services for an application
    List {
        /// Logical application name
        #[arg(short, long)]
        application: String,

        /// Include unhealthy instances
        #[arg(long)]
        all: bool,

        /// API endpoint
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,
    },

    /// Set the status of a registered service
    SetStatus {
        /// Service identifier
        #[arg(short, long)]
        id: String,

        /// New status (HEALTHY or UNHEALTHY)
        #[arg(short, long)]
        status: String,

        /// API endpoint
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "service-registry.toml")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show current configuration
    Show {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(log_level: &str, log_format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
    );

    match log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            storage,
            database_url,
        } => {
            // Load configuration with fallback to defaults
            let mut config = if config.exists() {
                match ServiceRegistryConfig::from_file(&config) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        eprintln!("Failed to load configuration from {}: {}", config.display(), e);
                        std::process::exit(1);
                    }
                }
            } else {
                eprintln!(
                    "Configuration file not found: {}. Using defaults.",
                    config.display()
                );
                match ServiceRegistryConfig::load_with_defaults() {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        eprintln!("Failed to load default configuration: {}", e);
                        std::process::exit(1);
                    }
                }
            };

            // Override configuration with CLI arguments
            config.api.host = host;
            config.api.port = port;

            if let Some(storage) = storage {
                config.storage.backend = match storage.as_str() {
                    "postgres" => StorageBackendType::Postgres,
                    "sqlite" => StorageBackendType::Sqlite,
                    "memory" => StorageBackendType::Memory,
                    _ => {
                        eprintln!("Unsupported storage backend: {}", storage);
                        std::process::exit(1);
                    }
                };
            }

            if let Some(url) = database_url {
                match config.storage.backend {
                    StorageBackendType::Postgres => {
                        config.storage.postgres.url = url;
                    }
                    StorageBackendType::Sqlite => {
                        config.storage.sqlite.database_path = PathBuf::from(url);
                    }
                    StorageBackendType::Memory => {
                        eprintln!("Database URL ignored for memory storage backend");
                    }
                }
            }

            init_tracing(&config.monitoring.log_level, config.monitoring.log_format);

            // Validate the final configuration
            if let Err(e) = config.validate() {
                error!("Configuration validation failed:");
                eprintln!("{}", e);
                std::process::exit(1);
            }

            // Initialize registry manager with the configured storage backend
            let manager = ServiceRegistryManager::new_with_storage(config.clone()).await?;
            manager.initialize().await?;
            let manager = Arc::new(manager);

            // Create API server
            let api = service_registry::api::ServiceRegistryApi::new(manager.clone());
            let app = api.create_app();

            // Start server
            let addr = SocketAddr::from_str(&format!("{}:{}", config.api.host, config.api.port))?;
            let listener = tokio::net::TcpListener::bind(addr).await?;

            info!("Service registry server starting on {}", addr);

            let server = axum::serve(listener, app);
            server.await?;

            // Shutdown
            manager.shutdown().await?;
        }

        Commands::Register {
            application,
            location,
            port,
            id,
            status,
            endpoint,
        } => {
            init_tracing("info", LogFormat::Text);

            let client = RegistryClient::new(endpoint);

            let mut registration = ServiceRegistration::new(application, location, port);
            if let Some(id) = id {
                registration = registration.with_id(id);
            }
            if let Some(status) = status {
                registration = registration.with_status(status.parse::<ServiceStatus>()?);
            }

            let saved = client.register(&registration).await?;
            println!(
                "Registered service {} for {} at {}",
                saved.id, saved.application, saved.endpoint()
            );
        }

        Commands::Get { id, endpoint } => {
            init_tracing("info", LogFormat::Text);

            let client = RegistryClient::new(endpoint);
            let service = client.find(&id).await?;

            println!("{}", serde_json::to_string_pretty(&service)?);
        }

        Commands::List {
            application,
            all,
            endpoint,
        } => {
            init_tracing("info", LogFormat::Text);

            let client = RegistryClient::new(endpoint);
            let services = client.find_by_application(&application, !all).await?;

            println!("{}", serde_json::to_string_pretty(&services)?);
        }

        Commands::SetStatus {
            id,
            status,
            endpoint,
        } => {
            init_tracing("info", LogFormat::Text);

            let client = RegistryClient::new(endpoint);
            let status = status.parse::<ServiceStatus>()?;
            client.set_status(&id, status).await?;

            println!("Status {} recorded for service {}", status, id);
        }

        Commands::Config { command } => {
            init_tracing("info", LogFormat::Text);

            match command {
                ConfigCommands::Generate { output } => {
                    std::fs::write(&output, ServiceRegistryConfig::generate_example())?;
                    println!("Example configuration written to {}", output.display());
                }
                ConfigCommands::Validate { config } => {
                    let config = ServiceRegistryConfig::from_file(&config)?;
                    match config.validate() {
                        Ok(()) => println!("Configuration is valid"),
                        Err(e) => {
                            eprintln!("{}", e);
                            std::process::exit(1);
                        }
                    }
                }
                ConfigCommands::Show { config } => {
                    let config = match config {
                        Some(path) => ServiceRegistryConfig::from_file(&path)?,
                        None => ServiceRegistryConfig::load_with_defaults()?,
                    };

                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
            }
        }
    }

    Ok(())
}
