//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server exposing
//! CRUD endpoints over form documents.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── forms/          - Form store contract, implementations and handlers
//! ├── middleware/     - CORS and tracing layers
//! ├── docs.rs         - OpenAPI document
//! └── error/          - Error types and HTTP conversion
//! ```
//!
//! # State Management
//!
//! `AppState` holds the form store as `Arc<dyn FormStore>`. The store is the
//! only shared mutable state; it enforces `formId` uniqueness and dual-key
//! resolution itself.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; each error variant maps to one
//! status code (400, 404, 409, 500) and a JSON body.
//!
//! # Example
//!
//! ```rust,no_run
//! use formselect::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let app = create_app(&ServerConfig::from_env()).await;
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Form persistence and handlers
pub mod forms;

/// Middleware for request processing
pub mod middleware;

/// OpenAPI document
pub mod docs;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::create_app;
pub use forms::{FormStore, MemoryFormStore, PgFormStore, SharedFormStore, StoreError};
pub use error::BackendError;
