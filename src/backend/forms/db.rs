/**
 * PostgreSQL Form Store
 *
 * Persists form documents in the `forms` table. The definition is stored
 * as JSONB and never inspected by the database.
 *
 * ```sql
 * forms (id UUID PRIMARY KEY, form_id TEXT UNIQUE, title TEXT,
 *        form_definition JSONB, created_at TIMESTAMPTZ)
 * ```
 *
 * `formId` uniqueness is enforced by the UNIQUE constraint together with
 * `ON CONFLICT DO NOTHING`, so two concurrent creates with the same
 * `formId` produce one row and one conflict.
 */

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::backend::forms::store::{parse_storage_id, FormStore, StoreError};
use crate::shared::form::{FormDocument, NewForm};

/// Form store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgFormStore {
    pool: PgPool,
}

impl PgFormStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Storage-id lookups that fail are logged and treated as a miss
fn soft_miss(
    id: &str,
    result: Result<Option<FormDocument>, sqlx::Error>,
) -> Option<FormDocument> {
    match result {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Storage id lookup for '{}' failed, falling back to formId: {:?}", id, e);
            None
        }
    }
}

#[async_trait]
impl FormStore for PgFormStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, form: NewForm) -> Result<FormDocument, StoreError> {
        let form_id = form.form_id.clone();
        let document = FormDocument::new(form);

        let inserted = sqlx::query_as::<_, FormDocument>(
            r#"
            INSERT INTO forms (id, form_id, title, form_definition, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (form_id) DO NOTHING
            RETURNING id, form_id, title, form_definition, created_at
            "#
        )
        .bind(document.storage_id)
        .bind(&document.form_id)
        .bind(&document.title)
        .bind(&document.form_definition)
        .bind(document.created_at)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or(StoreError::Conflict { form_id })
    }

    async fn find_by_either_id(&self, id: &str) -> Result<Option<FormDocument>, StoreError> {
        if let Some(storage_id) = parse_storage_id(id) {
            let result = sqlx::query_as::<_, FormDocument>(
                r#"
                SELECT id, form_id, title, form_definition, created_at
                FROM forms
                WHERE id = $1
                "#
            )
            .bind(storage_id)
            .fetch_optional(&self.pool)
            .await;

            if let Some(document) = soft_miss(id, result) {
                return Ok(Some(document));
            }
        }

        let document = sqlx::query_as::<_, FormDocument>(
            r#"
            SELECT id, form_id, title, form_definition, created_at
            FROM forms
            WHERE form_id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn update(&self, id: &str, definition: Value) -> Result<Option<FormDocument>, StoreError> {
        if let Some(storage_id) = parse_storage_id(id) {
            let result = sqlx::query_as::<_, FormDocument>(
                r#"
                UPDATE forms
                SET form_definition = $1
                WHERE id = $2
                RETURNING id, form_id, title, form_definition, created_at
                "#
            )
            .bind(&definition)
            .bind(storage_id)
            .fetch_optional(&self.pool)
            .await;

            if let Some(document) = soft_miss(id, result) {
                return Ok(Some(document));
            }
        }

        let document = sqlx::query_as::<_, FormDocument>(
            r#"
            UPDATE forms
            SET form_definition = $1
            WHERE form_id = $2
            RETURNING id, form_id, title, form_definition, created_at
            "#
        )
        .bind(&definition)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn delete(&self, id: &str) -> Result<Option<FormDocument>, StoreError> {
        if let Some(storage_id) = parse_storage_id(id) {
            let result = sqlx::query_as::<_, FormDocument>(
                r#"
                DELETE FROM forms
                WHERE id = $1
                RETURNING id, form_id, title, form_definition, created_at
                "#
            )
            .bind(storage_id)
            .fetch_optional(&self.pool)
            .await;

            if let Some(document) = soft_miss(id, result) {
                return Ok(Some(document));
            }
        }

        let document = sqlx::query_as::<_, FormDocument>(
            r#"
            DELETE FROM forms
            WHERE form_id = $1
            RETURNING id, form_id, title, form_definition, created_at
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn list_all(&self) -> Result<Vec<FormDocument>, StoreError> {
        let documents = sqlx::query_as::<_, FormDocument>(
            r#"
            SELECT id, form_id, title, form_definition, created_at
            FROM forms
            ORDER BY created_at DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }
}
