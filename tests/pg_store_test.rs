//! PostgreSQL form store tests
//!
//! Run against the database named by `DATABASE_URL`; each test returns early
//! when it is unset. Tests share the `forms` table and run serially.

#![cfg(feature = "ssr")]

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use common::database::test_database;
use formselect::backend::server::create_app_with_store;
use formselect::backend::{FormStore, PgFormStore, StoreError};
use formselect::shared::form::NewForm;

fn new_form(form_id: &str) -> NewForm {
    NewForm {
        form_id: form_id.to_string(),
        title: form_id.to_string(),
        form_definition: json!({ "title": form_id }),
    }
}

async fn store() -> Option<PgFormStore> {
    test_database().await.map(PgFormStore::new)
}

#[tokio::test]
#[serial]
async fn test_duplicate_form_id_conflicts() {
    let Some(store) = store().await else { return };
    let first = store.create(new_form("A")).await.unwrap();

    let second = store
        .create(NewForm {
            form_definition: json!({ "components": [1] }),
            ..new_form("A")
        })
        .await;
    assert_matches!(second, Err(StoreError::Conflict { form_id }) if form_id == "A");

    let stored = store.find_by_either_id("A").await.unwrap().unwrap();
    assert_eq!(stored, first);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_lookup_by_both_keys_returns_same_document() {
    let Some(store) = store().await else { return };
    let created = store.create(new_form("contact")).await.unwrap();

    let by_storage = store
        .find_by_either_id(&created.storage_id.to_string())
        .await
        .unwrap();
    let by_form_id = store.find_by_either_id("contact").await.unwrap();

    assert_eq!(by_storage, Some(created.clone()));
    assert_eq!(by_form_id, Some(created));
    assert_eq!(store.find_by_either_id("unrelated").await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_storage_id_takes_precedence() {
    let Some(store) = store().await else { return };
    let first = store.create(new_form("first")).await.unwrap();
    let second = store
        .create(new_form(&first.storage_id.to_string()))
        .await
        .unwrap();

    let found = store
        .find_by_either_id(&first.storage_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.storage_id, first.storage_id);
    assert_ne!(found.storage_id, second.storage_id);

    // A well-formed uuid that names no document falls back to formId
    let uuid_named = store
        .create(new_form(&uuid::Uuid::new_v4().to_string()))
        .await
        .unwrap();
    let found = store
        .find_by_either_id(&uuid_named.form_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.storage_id, uuid_named.storage_id);
}

#[tokio::test]
#[serial]
async fn test_update_overwrites_definition_only() {
    let Some(store) = store().await else { return };
    let created = store.create(new_form("contact")).await.unwrap();

    let updated = store
        .update(&created.storage_id.to_string(), json!({ "components": [] }))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.storage_id, created.storage_id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.form_definition, json!({ "components": [] }));

    let by_form_id = store
        .update("contact", json!({ "components": [{ "key": "q1" }] }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_form_id.storage_id, created.storage_id);
    assert!(store.update("missing", json!({})).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_delete_only_matching_document() {
    let Some(store) = store().await else { return };
    let kept = store.create(new_form("kept")).await.unwrap();
    let gone = store.create(new_form("gone")).await.unwrap();

    assert!(store.delete("unrelated").await.unwrap().is_none());
    let deleted = store
        .delete(&gone.storage_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.form_id, "gone");

    let remaining = store.list_all().await.unwrap();
    assert_eq!(remaining, vec![kept]);
}

#[tokio::test]
#[serial]
async fn test_list_newest_first() {
    let Some(store) = store().await else { return };
    for id in ["one", "two", "three"] {
        store.create(new_form(id)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let ids: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.form_id)
        .collect();
    assert_eq!(ids, vec!["three", "two", "one"]);
}

#[tokio::test]
#[serial]
async fn test_router_over_postgres() {
    let Some(store) = store().await else { return };
    let server = axum_test::TestServer::new(create_app_with_store(Arc::new(store))).unwrap();

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["storage"], "postgres");

    let body = json!({ "formId": "A", "formDefinition": { "components": [] } });
    assert_eq!(server.post("/forms").json(&body).await.status_code(), StatusCode::CREATED);
    assert_eq!(server.post("/forms").json(&body).await.status_code(), StatusCode::CONFLICT);
    assert_eq!(server.get("/forms/missing").await.status_code(), StatusCode::NOT_FOUND);
}
