//! API endpoint handlers
//!
//! This module contains the API endpoint handlers for the service registry.

use crate::registry::ServiceRegistryManager;
use crate::service::{ServiceRecord, ServiceRegistration, ServiceStatus};
use std::sync::Arc;

use super::{error::ApiError, requests::*, responses::*};

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

/// Health check endpoint
pub async fn health_check(
    State(registry): State<Arc<ServiceRegistryManager>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let healthy = registry
        .health_check()
        .await
        .map_err(|e| ApiError::internal(&e.to_string()))?;

    let state = registry.get_state().await;

    Ok(Json(HealthResponse {
        status: if healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: chrono::Utc::now(),
        initialized: state.initialized,
        last_health_check: state.last_health_check,
    }))
}

/// Register service endpoint
pub async fn register_service(
    State(registry): State<Arc<ServiceRegistryManager>>,
    Json(request): Json<RegisterServiceRequest>,
) -> Result<Json<ServiceRecord>, ApiError> {
    let registration = ServiceRegistration {
        id: request.id,
        application: request.application,
        location: request.location,
        port: request.port,
        status: request.status,
    };

    let saved = registry
        .register(registration)
        .await
        .map_err(ApiError::from_registry_error)?;

    Ok(Json(saved))
}

/// Find service endpoint
pub async fn find_service(
    State(registry): State<Arc<ServiceRegistryManager>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceRecord>, ApiError> {
    let service = registry
        .find(&id)
        .await
        .map_err(ApiError::from_registry_error)?;

    Ok(Json(service))
}

/// Set service status endpoint
pub async fn set_service_status(
    State(registry): State<Arc<ServiceRegistryManager>>,
    Path((id, status)): Path<(String, String)>,
) -> Result<Json<SetStatusResponse>, ApiError> {
    let status: ServiceStatus = status.parse().map_err(ApiError::from_registry_error)?;

    registry
        .set_status(&id, status)
        .await
        .map_err(ApiError::from_registry_error)?;

    Ok(Json(SetStatusResponse {
        message: "Status updated".to_string(),
    }))
}

/// Find application services endpoint
pub async fn find_application_services(
    State(registry): State<Arc<ServiceRegistryManager>>,
    Query(query): Query<ListServicesQuery>,
) -> Result<Json<Vec<ServiceRecord>>, ApiError> {
    let application = query
        .application
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required query parameter: application"))?;

    let only_healthy = query.only_healthy.unwrap_or(true);

    let services = registry
        .find_application_services(&application, only_healthy)
        .await
        .map_err(ApiError::from_registry_error)?;

    Ok(Json(services))
}

/// Get stats endpoint
pub async fn get_stats(
    State(registry): State<Arc<ServiceRegistryManager>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = registry
        .get_stats()
        .await
        .map_err(ApiError::from_registry_error)?;

    Ok(Json(StatsResponse { stats }))
}
