//! Shared Error Types
//!
//! This module defines error types that are shared between the server and
//! the client. These errors represent failure cases that can occur on both
//! sides of the forms API.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A required field is missing or empty
//! - `DefinitionError` - A form definition does not have the expected shape
//!
//! # Usage
//!
//! ```rust
//! use formselect::shared::error::SharedError;
//!
//! let error = SharedError::validation("formId", "formId is required");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both server and client
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Form definition shape error
    #[error("Definition error: {message}")]
    DefinitionError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new definition error
    pub fn definition(message: impl Into<String>) -> Self {
        Self::DefinitionError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
