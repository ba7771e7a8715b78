//! Forms Module
//!
//! This module handles persistence of form documents and the `/forms`
//! HTTP handlers.
//!
//! - **`store`** - The `FormStore` contract and dual-key resolution rules
//! - **`db`** - PostgreSQL implementation
//! - **`memory`** - In-memory implementation
//! - **`handlers`** - Axum handlers for the CRUD endpoints

pub mod store;
pub mod db;
pub mod memory;
pub mod handlers;

pub use store::{FormStore, SharedFormStore, StoreError};
pub use db::PgFormStore;
pub use memory::MemoryFormStore;
pub use handlers::*;
