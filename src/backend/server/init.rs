/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection and route configuration.
 *
 * # Initialization Process
 *
 * 1. Select the form store (PostgreSQL or in-memory)
 * 2. Create application state
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::forms::SharedFormStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// The function is designed to be resilient: a missing or unreachable
/// database does not prevent startup, the in-memory store is used instead.
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing formselect backend server");

    let form_store = load_store(config).await;
    tracing::info!("Using {} form store", form_store.backend_name());

    create_app_with_store(form_store)
}

/// Create the application around an existing store
pub fn create_app_with_store(form_store: SharedFormStore) -> Router<()> {
    let app_state = AppState::new(form_store);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
