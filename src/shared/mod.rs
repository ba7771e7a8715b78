//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and the client. Everything here is platform-agnostic and
//! serializable so it can travel over the forms HTTP API.
//!
//! # Overview
//!
//! - **`form`** - Persisted form documents and API request/response bodies
//! - **`component`** - Depth-first traversal of form component trees
//! - **`reference`** - Form reference collection and render preparation
//! - **`error`** - Shared error types
//! - **`config`** - Application configuration

/// Form documents and API bodies
pub mod form;

/// Component tree traversal
pub mod component;

/// Form reference resolution
pub mod reference;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use form::{CreateFormRequest, DeleteFormResponse, FormDocument, UpdateFormRequest};
pub use component::{is_selector, selector_keys, walk_components, walk_components_mut, SELECTOR_TYPE};
pub use reference::{
    collect_references, prepare_for_render, FormReference, LiveSelection, SelectionSnapshot,
    SelectionSource,
};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
