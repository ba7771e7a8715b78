//! Forms HTTP Handlers
//!
//! CRUD handlers for `/forms`. Each handler resolves ids through the store's
//! dual-key lookup and returns `BackendError` on failure.
//!
//! | Method & Path        | Success                    | Failure            |
//! |----------------------|----------------------------|--------------------|
//! | `POST /forms`        | 201, created document      | 400, 409, 500      |
//! | `GET /forms`         | 200, documents newest first| 500                |
//! | `GET /forms/{id}`    | 200, document              | 404, 500           |
//! | `PUT /forms/{id}`    | 200, updated document      | 400, 404, 500      |
//! | `DELETE /forms/{id}` | 200, confirmation message  | 404, 500           |

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::forms::store::SharedFormStore;
use crate::shared::form::{CreateFormRequest, DeleteFormResponse, FormDocument, UpdateFormRequest};

const NOT_FOUND_MESSAGE: &str = "Form not found.";

/// Create a form
///
/// # Errors
///
/// * `400 Bad Request` - `formId` or `formDefinition` missing, or body is not JSON
/// * `409 Conflict` - a form with this `formId` already exists
/// * `500 Internal Server Error` - the store failed
///
/// # Example Request
///
/// ```http
/// POST /forms HTTP/1.1
/// Content-Type: application/json
///
/// { "formId": "contact", "formDefinition": { "title": "Contact" } }
/// ```
pub async fn create_form(
    State(store): State<SharedFormStore>,
    payload: Result<Json<CreateFormRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FormDocument>), BackendError> {
    let Json(request) = payload?;
    let form = request.validate()?;

    tracing::info!("Creating form '{}'", form.form_id);

    let created = store
        .create(form)
        .await
        .map_err(|e| BackendError::store("Error saving form.", e))?;

    tracing::info!("Form '{}' created with storage id {}", created.form_id, created.storage_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all forms, newest first
pub async fn list_forms(
    State(store): State<SharedFormStore>,
) -> Result<Json<Vec<FormDocument>>, BackendError> {
    let forms = store
        .list_all()
        .await
        .map_err(|e| BackendError::store("Error listing forms.", e))?;

    tracing::debug!("Listing {} forms", forms.len());
    Ok(Json(forms))
}

/// Get a form by storage id or `formId`
pub async fn get_form(
    State(store): State<SharedFormStore>,
    Path(id): Path<String>,
) -> Result<Json<FormDocument>, BackendError> {
    store
        .find_by_either_id(&id)
        .await
        .map_err(|e| BackendError::store("Error fetching form.", e))?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(NOT_FOUND_MESSAGE))
}

/// Replace the definition of a form
///
/// Only `formDefinition` is changed; identity, title and creation time are kept.
pub async fn update_form(
    State(store): State<SharedFormStore>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFormRequest>, JsonRejection>,
) -> Result<Json<FormDocument>, BackendError> {
    let Json(request) = payload?;
    let definition = request.validate()?;

    let updated = store
        .update(&id, definition)
        .await
        .map_err(|e| BackendError::store("Error updating form.", e))?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND_MESSAGE))?;

    tracing::info!("Form '{}' updated", updated.form_id);
    Ok(Json(updated))
}

/// Delete a form by storage id or `formId`
pub async fn delete_form(
    State(store): State<SharedFormStore>,
    Path(id): Path<String>,
) -> Result<Json<DeleteFormResponse>, BackendError> {
    let deleted = store
        .delete(&id)
        .await
        .map_err(|e| BackendError::store("Error deleting form.", e))?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND_MESSAGE))?;

    tracing::info!("Form '{}' deleted", deleted.form_id);
    Ok(Json(DeleteFormResponse::deleted()))
}
