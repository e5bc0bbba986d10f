//! Registry state management
//!
//! This module contains the state structures and management for the service registry.

use chrono;
use serde::{Deserialize, Serialize};

/// Registry state
#[derive(Debug, Clone)]
pub struct RegistryState {
    /// Whether the registry is initialized
    pub initialized: bool,

    /// Whether the registry is healthy
    pub healthy: bool,

    /// Last health check timestamp
    pub last_health_check: chrono::DateTime<chrono::Utc>,

    /// Registry statistics
    pub stats: RegistryStats,
}

/// Registry statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Total number of registered services
    pub total_services: u64,

    /// Number of services reporting healthy
    pub healthy_services: u64,

    /// Number of distinct applications
    pub applications: u64,

    /// Number of registrations handled
    pub registrations: u64,

    /// Number of status updates handled
    pub status_updates: u64,

    /// Last activity timestamp
    pub last_activity: chrono::DateTime<chrono::Utc>,
}

impl RegistryState {
    /// Create a new registry state
    pub fn new() -> Self {
        Self {
            initialized: false,
            healthy: false,
            last_health_check: chrono::Utc::now(),
            stats: RegistryStats::new(),
        }
    }

    /// Mark the registry as initialized
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Update health status
    pub fn update_health(&mut self, healthy: bool) {
        self.healthy = healthy;
        self.last_health_check = chrono::Utc::now();
    }
}

impl RegistryStats {
    /// Create new registry statistics
    pub fn new() -> Self {
        Self {
            total_services: 0,
            healthy_services: 0,
            applications: 0,
            registrations: 0,
            status_updates: 0,
            last_activity: chrono::Utc::now(),
        }
    }

    /// Track a handled registration
    pub fn track_registration(&mut self) {
        self.registrations += 1;
        self.last_activity = chrono::Utc::now();
    }

    /// Track a handled status update
    pub fn track_status_update(&mut self) {
        self.status_updates += 1;
        self.last_activity = chrono::Utc::now();
    }
}

impl Default for RegistryState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RegistryStats {
    fn default() -> Self {
        Self::new()
    }
}
