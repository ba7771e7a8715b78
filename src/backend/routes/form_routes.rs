/**
 * Form Route Handlers
 *
 * This module wires the `/forms` CRUD handlers into the router.
 *
 * # Routes
 *
 * - `POST /forms` - Create a form
 * - `GET /forms` - List forms, newest first
 * - `GET /forms/{id}` - Get a form by storage id or `formId`
 * - `PUT /forms/{id}` - Replace a form's definition
 * - `DELETE /forms/{id}` - Delete a form
 */

use axum::{routing, Router};

use crate::backend::forms::handlers::{create_form, delete_form, get_form, list_forms, update_form};
use crate::backend::server::state::AppState;

/// Configure form routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with form routes configured
pub fn configure_form_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/forms",
            routing::post(create_form).get(list_forms),
        )
        .route(
            "/forms/{id}",
            routing::get(get_form).put(update_form).delete(delete_form),
        )
}
