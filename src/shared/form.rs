//! Form Document Data Structures
//!
//! This module defines the persisted form document and the request and
//! response bodies of the forms API.
//!
//! # Wire Format
//!
//! Documents travel as camelCase JSON. The storage-assigned identifier is
//! serialized as `_id` so that existing form-builder pages, which read
//! `_id`, `formId` and `formDefinition`, keep working:
//!
//! ```json
//! {
//!   "_id": "6f1c1d2e-4b8a-4c61-9a57-0d0a3c1f8b11",
//!   "formId": "contact",
//!   "title": "Contact",
//!   "formDefinition": { "components": [] },
//!   "createdAt": "2026-10-19T08:30:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// A persisted form definition plus its identity and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    /// Identifier assigned by the store on creation
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "ssr", sqlx(rename = "id"))]
    pub storage_id: Uuid,
    /// Caller-supplied identifier, unique across all documents
    pub form_id: String,
    /// Human-readable title, defaults to `form_id`
    pub title: String,
    /// The form definition, opaque to the store
    pub form_definition: Value,
    /// Creation timestamp, never mutated
    pub created_at: DateTime<Utc>,
}

impl FormDocument {
    /// Create a new document with a fresh storage id and the current time
    pub fn new(form: NewForm) -> Self {
        Self {
            storage_id: Uuid::new_v4(),
            form_id: form.form_id,
            title: form.title,
            form_definition: form.form_definition,
            created_at: Utc::now(),
        }
    }

    /// The top-level component list of the definition, if any
    pub fn components(&self) -> Option<&Value> {
        self.form_definition.get("components")
    }
}

/// A validated creation request
#[derive(Debug, Clone, PartialEq)]
pub struct NewForm {
    pub form_id: String,
    pub title: String,
    pub form_definition: Value,
}

/// Body of `POST /forms`
///
/// All fields are optional at the type level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_definition: Option<Value>,
}

impl CreateFormRequest {
    pub fn new(form_id: impl Into<String>, form_definition: Value) -> Self {
        Self {
            form_id: Some(form_id.into()),
            title: None,
            form_definition: Some(form_definition),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check required fields and apply the title default
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming every missing field.
    pub fn validate(self) -> Result<NewForm, SharedError> {
        let form_id = self.form_id.filter(|id| !id.is_empty());
        let form_definition = self.form_definition.filter(|def| !is_missing(def));

        match (form_id, form_definition) {
            (Some(form_id), Some(form_definition)) => {
                let title = self
                    .title
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| form_id.clone());
                Ok(NewForm {
                    form_id,
                    title,
                    form_definition,
                })
            }
            (None, Some(_)) => Err(SharedError::validation("formId", "'formId' is required")),
            (Some(_), None) => Err(SharedError::validation(
                "formDefinition",
                "'formDefinition' is required",
            )),
            (None, None) => Err(SharedError::validation(
                "formId, formDefinition",
                "'formId' and 'formDefinition' are required",
            )),
        }
    }
}

/// Body of `PUT /forms/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_definition: Option<Value>,
}

impl UpdateFormRequest {
    pub fn new(form_definition: Value) -> Self {
        Self {
            form_definition: Some(form_definition),
        }
    }

    /// Return the new definition, or a `ValidationError` if it is missing
    pub fn validate(self) -> Result<Value, SharedError> {
        self.form_definition
            .filter(|def| !is_missing(def))
            .ok_or_else(|| {
                SharedError::validation("formDefinition", "'formDefinition' is required")
            })
    }
}

/// Body returned by `DELETE /forms/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFormResponse {
    pub message: String,
}

impl DeleteFormResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Form deleted successfully.".to_string(),
        }
    }
}

/// Whether a JSON value counts as "not provided"
///
/// Form-builder clients send `null`, `false`, `0` or `""` for fields they
/// did not fill in, so all of those are treated as missing.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
