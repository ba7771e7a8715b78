//! Form Store Contract
//!
//! The store persists [`FormDocument`]s and resolves them by either key:
//!
//! 1. the storage id assigned on creation (a UUID)
//! 2. the caller-supplied `formId`
//!
//! Lookups, updates and deletes try the storage id first. An id that is not
//! a valid UUID, or a storage-id query that fails, counts as a miss so that
//! the `formId` lookup always gets its turn. When an id could match two
//! different documents, the storage-id match wins.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::form::{FormDocument, NewForm};

/// Errors returned by form stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this `formId` already exists
    #[error("a form with formId '{form_id}' already exists")]
    Conflict { form_id: String },

    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure
    #[error("store error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Persistence of form documents
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Short name of the storage backend, reported by the health endpoint
    fn backend_name(&self) -> &'static str;

    /// Insert a new document
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if a document with the same `formId` exists.
    async fn create(&self, form: NewForm) -> Result<FormDocument, StoreError>;

    /// Find a document by storage id, falling back to `formId`
    async fn find_by_either_id(&self, id: &str) -> Result<Option<FormDocument>, StoreError>;

    /// Replace the definition of a document, resolved like `find_by_either_id`
    async fn update(&self, id: &str, definition: Value) -> Result<Option<FormDocument>, StoreError>;

    /// Remove a document, resolved like `find_by_either_id`
    async fn delete(&self, id: &str) -> Result<Option<FormDocument>, StoreError>;

    /// All documents, newest first
    async fn list_all(&self) -> Result<Vec<FormDocument>, StoreError>;
}

/// Form store shared across handlers
pub type SharedFormStore = Arc<dyn FormStore>;

/// Parse a storage id, treating malformed ids as a miss
pub fn parse_storage_id(id: &str) -> Option<Uuid> {
    match Uuid::parse_str(id) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            tracing::debug!("'{}' is not a storage id, falling back to formId", id);
            None
        }
    }
}
