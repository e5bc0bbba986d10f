//! API server implementation
//!
//! This module contains the API server implementation and router setup.

use crate::registry::ServiceRegistryManager;
use std::sync::Arc;

use super::endpoints::*;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// API server for the service registry
#[allow(dead_code)]
pub struct ServiceRegistryApi {
    /// Registry manager
    registry: Arc<ServiceRegistryManager>,
    /// Router
    router: Router,
}

impl ServiceRegistryApi {
    /// Create a new API server
    pub fn new(registry: Arc<ServiceRegistryManager>) -> Self {
        let config = registry.get_config();

        // Ensure base path starts with '/'
        let base_path = if config.api.base_path.starts_with('/') {
            config.api.base_path.clone()
        } else {
            format!("/{}", config.api.base_path)
        };
        let enable_cors = config.api.enable_cors;
        let enable_metrics = config.monitoring.enable_metrics;

        let router = Self::create_router(registry.clone(), &base_path, enable_cors, enable_metrics);

        Self { registry, router }
    }

    /// Create the router with all endpoints
    fn create_router(
        registry: Arc<ServiceRegistryManager>,
        base_path: &str,
        enable_cors: bool,
        enable_metrics: bool,
    ) -> Router {
        let api_routes = Router::new()
            .route("/services", post(register_service))
            .route("/services", get(find_application_services))
            .route("/services/:id", get(find_service))
            .route("/services/:id/status/:status", put(set_service_status))
            .route("/stats", get(get_stats));

        let router = Router::new()
            .route("/health", get(health_check))
            .nest(base_path, api_routes);

        let router = if enable_metrics {
            router.layer(axum::middleware::from_fn_with_state(
                registry.clone(),
                track_api_metrics,
            ))
        } else {
            router
        };

        let router = router.layer(TraceLayer::new_for_http());

        let router = if enable_cors {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        };

        router.with_state(registry)
    }

    /// Get the application router for serving
    pub fn create_app(&self) -> Router {
        self.router.clone()
    }
}

/// Record request metrics for every API call
async fn track_api_metrics(
    State(registry): State<Arc<ServiceRegistryManager>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    registry
        .metrics()
        .record_api_request(&path, &method, response.status().as_u16());

    response
}
