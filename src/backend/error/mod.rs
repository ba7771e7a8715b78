//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and convert to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and rejection conversions
//! ```
//!
//! # Error Types
//!
//! - `ValidationError` - 400, missing or malformed request fields
//! - `ConflictError` - 409, duplicate `formId`
//! - `NotFoundError` - 404, no form under either key
//! - `StoreError` - 500, persistence failure (logged with its cause)
//! - `SharedError` - Errors from the shared module

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
