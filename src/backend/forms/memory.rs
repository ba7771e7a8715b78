//! In-Memory Form Store
//!
//! Used when no database is configured and by the test suite. Documents are
//! kept in insertion order behind a `tokio::sync::RwLock`; the uniqueness
//! check and the insert happen under the same write guard.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::backend::forms::store::{parse_storage_id, FormStore, StoreError};
use crate::shared::form::{FormDocument, NewForm};

/// Form store holding documents in process memory
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    documents: RwLock<Vec<FormDocument>>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Position of the document `id` resolves to, storage id first
fn resolve(documents: &[FormDocument], id: &str) -> Option<usize> {
    parse_storage_id(id)
        .and_then(|storage_id| documents.iter().position(|d| d.storage_id == storage_id))
        .or_else(|| documents.iter().position(|d| d.form_id == id))
}

#[async_trait]
impl FormStore for MemoryFormStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, form: NewForm) -> Result<FormDocument, StoreError> {
        let mut documents = self.documents.write().await;

        if documents.iter().any(|d| d.form_id == form.form_id) {
            return Err(StoreError::Conflict {
                form_id: form.form_id,
            });
        }

        let document = FormDocument::new(form);
        documents.push(document.clone());
        Ok(document)
    }

    async fn find_by_either_id(&self, id: &str) -> Result<Option<FormDocument>, StoreError> {
        let documents = self.documents.read().await;
        Ok(resolve(&documents, id).map(|index| documents[index].clone()))
    }

    async fn update(&self, id: &str, definition: Value) -> Result<Option<FormDocument>, StoreError> {
        let mut documents = self.documents.write().await;
        Ok(resolve(&documents, id).map(|index| {
            documents[index].form_definition = definition;
            documents[index].clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<FormDocument>, StoreError> {
        let mut documents = self.documents.write().await;
        Ok(resolve(&documents, id).map(|index| documents.remove(index)))
    }

    async fn list_all(&self) -> Result<Vec<FormDocument>, StoreError> {
        let documents = self.documents.read().await;
        let mut listed: Vec<FormDocument> = documents.iter().rev().cloned().collect();
        // Stable sort keeps later inserts first when timestamps tie
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}
