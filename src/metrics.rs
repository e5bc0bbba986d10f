//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Metrics for the Service Registry
//!
//! This module provides metrics collection and export functionality
//! for monitoring the service registry.

use crate::registry::RegistryStats;

#[cfg(feature = "metrics")]
use metrics::{counter, gauge, histogram};

#[cfg(not(feature = "metrics"))]
macro_rules! counter {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)*) => {
        // No-op when metrics feature is disabled
    };
}

#[cfg(not(feature = "metrics"))]
macro_rules! gauge {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)*) => {
        // No-op when metrics feature is disabled
    };
}

#[cfg(not(feature = "metrics"))]
macro_rules! histogram {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)*) => {
        // No-op when metrics feature is disabled
    };
}

/// Metrics collector for the service registry
pub struct MetricsCollector {
    /// Registry name for metrics
    registry_name: String,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new(registry_name: String) -> Self {
        Self { registry_name }
    }

    /// Record a service registration
    pub fn record_registration(&self, status: &str) {
        counter!("service_registry.services.registered", 1, "status" => status.to_string());
    }

    /// Record a service lookup
    pub fn record_lookup(&self, success: bool) {
        if success {
            counter!("service_registry.services.found", 1);
        } else {
            counter!("service_registry.services.lookup_failed", 1);
        }
    }

    /// Record a status update
    pub fn record_status_update(&self, status: &str) {
        counter!("service_registry.services.status_updates", 1, "status" => status.to_string());
    }

    /// Record an application discovery query
    pub fn record_discovery(&self, application: &str, result_count: usize) {
        counter!("service_registry.discovery.requests", 1, "application" => application.to_string());
        histogram!(
            "service_registry.discovery.result_count",
            result_count as f64
        );
    }

    /// Record an API request
    pub fn record_api_request(&self, endpoint: &str, method: &str, status_code: u16) {
        counter!("service_registry.api.requests", 1,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status_code" => status_code.to_string()
        );
    }

    /// Update registry statistics
    pub fn update_registry_stats(&self, stats: &RegistryStats) {
        tracing::trace!("updating metrics gauges for {}", self.registry_name);

        gauge!(
            "service_registry.services.total",
            stats.total_services as f64
        );
        gauge!(
            "service_registry.services.healthy",
            stats.healthy_services as f64
        );
        gauge!(
            "service_registry.applications.total",
            stats.applications as f64
        );
        gauge!(
            "service_registry.registrations.total",
            stats.registrations as f64
        );
        gauge!(
            "service_registry.status_updates.total",
            stats.status_updates as f64
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector() {
        let collector = MetricsCollector::new("service-registry".to_string());

        // Recording must not panic with or without the metrics feature.
        collector.record_registration("HEALTHY");
        collector.record_lookup(true);
        collector.record_lookup(false);
        collector.record_status_update("UNHEALTHY");
        collector.record_discovery("chat", 3);
        collector.record_api_request("/v1/services", "POST", 200);
        collector.update_registry_stats(&RegistryStats::new());
    }
}
