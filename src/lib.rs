// Large serde_json::json! literals in the API docs need a deeper macro recursion limit
#![recursion_limit = "256"]

//! formselect - Main Library
//!
//! formselect stores form definitions behind a small CRUD HTTP API and
//! provides a selector widget that lets a form author embed one stored form
//! inside another, optionally keeping a denormalized copy of the embedded
//! definition.
//!
//! # Overview
//!
//! This library provides:
//! - A form document store addressable by storage id or by `formId`
//! - Axum HTTP handlers for creating, listing, reading, updating and deleting forms
//! - Reference resolution over nested form component trees
//! - A selector widget state machine and a builder session that saves and loads forms
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and client
//!   - Form documents and request/response bodies
//!   - Component tree traversal and reference resolution
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, handlers and application state
//!   - PostgreSQL and in-memory form stores
//!   - OpenAPI document
//!
//! - **`client`** - Client-side code
//!   - HTTP client for the forms API
//!   - Selector widget and builder session
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend module, the server binary and
//!   the database dependencies.
//!
//! # Usage
//!
//! ```rust,no_run
//! use formselect::backend::server::init::create_app;
//! use formselect::backend::server::config::ServerConfig;
//!
//! # async fn example() {
//! let config = ServerConfig::from_env();
//! let app = create_app(&config).await;
//! // Serve `app` with axum::serve
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Forms API client, selector widget and builder session
pub mod client;
