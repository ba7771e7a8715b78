//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health, fallback, layers
//! └── form_routes.rs  - `/forms` CRUD routes
//! ```
//!
//! # Routes
//!
//! - `POST /forms`, `GET /forms`
//! - `GET /forms/{id}`, `PUT /forms/{id}`, `DELETE /forms/{id}`
//! - `GET /health`
//! - `GET /api-docs/openapi.json`

/// Main router creation
pub mod router;

/// Form CRUD routes
pub mod form_routes;

// Re-export commonly used functions
pub use router::create_router;
