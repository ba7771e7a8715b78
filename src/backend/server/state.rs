/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The form store is the only shared mutable state. Handlers are otherwise
 * independent, so no locks are taken at this level; uniqueness and dual-key
 * resolution are the store's job.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use formselect::backend::forms::SharedFormStore;
 *
 * async fn handler(State(store): State<SharedFormStore>) {
 *     let forms = store.list_all().await;
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::backend::forms::SharedFormStore;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Form document store
    pub form_store: SharedFormStore,
}

impl AppState {
    pub fn new(form_store: SharedFormStore) -> Self {
        Self { form_store }
    }
}

/// Lets handlers extract `State<SharedFormStore>` directly
impl FromRef<AppState> for SharedFormStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.form_store.clone()
    }
}
