//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests:
//! - Form definitions with selector components at every nesting level
//! - An in-process API server backed by the in-memory store
//! - A fake renderer that records mounted forms
//! - PostgreSQL fixtures gated on `DATABASE_URL`

#![allow(dead_code)]

pub mod database;

use std::sync::{Arc, Mutex};

use formselect::client::selector::{FormRenderer, RenderError};
use serde_json::{json, Value};

/// A definition with selectors directly, inside columns and inside tabs
pub fn nested_definition() -> Value {
    json!({
        "title": "Onboarding",
        "components": [
            { "type": "textfield", "key": "name" },
            { "type": "formselect", "key": "direct", "storeReference": true },
            {
                "type": "columns",
                "key": "layout",
                "rows": [[
                    { "components": [{ "type": "formselect", "key": "inColumn", "storeReference": false }] },
                    { "components": [{ "type": "email", "key": "email" }] }
                ]]
            },
            {
                "type": "tabs",
                "key": "steps",
                "tabs": [
                    { "components": [{ "type": "formselect", "key": "inTab", "storeReference": true }] }
                ]
            }
        ]
    })
}

/// A small embeddable definition
pub fn contact_definition() -> Value {
    json!({
        "display": "form",
        "components": [
            { "type": "textfield", "key": "firstName", "label": "First name" },
            { "type": "button", "key": "submit", "label": "Submit" }
        ]
    })
}

/// Spawn the API on an ephemeral port with an in-memory store
///
/// Returns the base URL, e.g. `http://127.0.0.1:41234`.
#[cfg(feature = "ssr")]
pub async fn spawn_api() -> String {
    use formselect::backend::server::create_app_with_store;
    use formselect::backend::MemoryFormStore;

    let app = create_app_with_store(Arc::new(MemoryFormStore::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// In-process test server for request/response assertions
#[cfg(feature = "ssr")]
pub fn test_server() -> axum_test::TestServer {
    use formselect::backend::server::create_app_with_store;
    use formselect::backend::MemoryFormStore;

    let app = create_app_with_store(Arc::new(MemoryFormStore::new()));
    axum_test::TestServer::new(app).expect("Failed to create test server")
}

/// Renderer that records which definitions are currently mounted
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    mounted: Arc<Mutex<Vec<(u64, String, Value)>>>,
    next_handle: Arc<Mutex<u64>>,
}

impl RecordingRenderer {
    /// `(container, definition)` of every mounted form
    pub fn mounted(&self) -> Vec<(String, Value)> {
        self.mounted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, container, definition)| (container.clone(), definition.clone()))
            .collect()
    }
}

impl FormRenderer for RecordingRenderer {
    type Handle = u64;

    fn render(&mut self, container: &str, definition: &Value) -> Result<u64, RenderError> {
        let mut next = self.next_handle.lock().unwrap();
        *next += 1;
        self.mounted
            .lock()
            .unwrap()
            .push((*next, container.to_string(), definition.clone()));
        Ok(*next)
    }

    fn destroy(&mut self, handle: u64) {
        self.mounted.lock().unwrap().retain(|(h, _, _)| *h != handle);
    }
}
