/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Form routes (CRUD)
 * 2. Health and API documentation
 * 3. Fallback handler (404)
 *
 * Request tracing and CORS layers wrap every route.
 */

use axum::{extract::State, routing, Json, Router};
use tower::ServiceBuilder;

use crate::backend::docs::openapi_spec;
use crate::backend::error::BackendError;
use crate::backend::forms::SharedFormStore;
use crate::backend::middleware::{cors_layer, trace_layer};
use crate::backend::routes::form_routes::configure_form_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state holding the form store
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_form_routes(Router::new());

    let router = router
        .route("/health", routing::get(health_check))
        .route("/api-docs/openapi.json", routing::get(openapi_spec));

    let router = router.fallback(|| async { BackendError::not_found("Route not found.") });

    router
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer())
                .layer(cors_layer()),
        )
        .with_state(app_state)
}

/// Liveness check reporting the active storage backend
async fn health_check(State(store): State<SharedFormStore>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "storage": store.backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
