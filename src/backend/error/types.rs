/**
 * Backend Error Types
 *
 * This module defines the errors the forms API can return. Every variant
 * maps to exactly one HTTP status code.
 *
 * # Error Categories
 *
 * ## Validation Errors (400)
 *
 * - Missing `formId` or `formDefinition`
 * - Malformed JSON request body
 *
 * ## Conflict Errors (409)
 *
 * - A form with the same `formId` already exists
 *
 * ## Not Found Errors (404)
 *
 * - Neither the storage id nor the `formId` resolves to a form
 *
 * ## Store Errors (500)
 *
 * - Any unexpected persistence failure; the cause is logged
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::forms::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use formselect::backend::error::BackendError;
///
/// let err = BackendError::validation("'formDefinition' is required");
/// let err = BackendError::not_found("Form not found.");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed request fields
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate `formId`
    #[error("Conflict: {message}")]
    ConflictError {
        /// Human-readable error message
        message: String,
    },

    /// Neither lookup key resolved
    #[error("Not found: {message}")]
    NotFoundError {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected persistence failure
    #[error("Store error: {message}")]
    StoreError {
        /// Message returned to the caller
        message: String,
        /// Underlying cause, logged but not returned
        #[source]
        source: StoreError,
    },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ConflictError {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    /// Wrap a store failure with the message shown to the caller
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        match source {
            StoreError::Conflict { form_id } => {
                Self::conflict(format!("A form with formId '{}' already exists.", form_id))
            }
            source => Self::StoreError {
                message: message.into(),
                source,
            },
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `ValidationError` - 400 Bad Request
    /// - `ConflictError` - 409 Conflict
    /// - `NotFoundError` - 404 Not Found
    /// - `StoreError` - 500 Internal Server Error
    /// - `SharedError` - 400 for validation, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::ConflictError { .. } => StatusCode::CONFLICT,
            Self::NotFoundError { .. } => StatusCode::NOT_FOUND,
            Self::StoreError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::DefinitionError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::ConflictError { message } => message.clone(),
            Self::NotFoundError { message } => message.clone(),
            Self::StoreError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}
