//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server: CORS
//! and request tracing. Both are applied to the whole router in
//! `routes::router::create_router`.

pub mod layers;

pub use layers::{cors_layer, trace_layer};
