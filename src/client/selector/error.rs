use thiserror::Error;

use crate::client::api::ApiError;

/// Failure reported by a [`FormRenderer`](super::FormRenderer)
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Render error: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Selector widget errors
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Error loading forms: {0}")]
    Fetch(#[from] ApiError),

    #[error("Form not found with ID: {form_id}")]
    FormNotFound { form_id: String },

    #[error("Form definition not found for form with ID: {form_id}")]
    MissingDefinition { form_id: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}
