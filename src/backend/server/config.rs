/**
 * Server Configuration
 *
 * This module handles loading of server configuration and selection of the
 * form store.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is
 * loaded by the server binary), with defaults for local development:
 *
 * | Variable       | Default   | Meaning                                  |
 * |----------------|-----------|------------------------------------------|
 * | `SERVER_HOST`  | `0.0.0.0` | Interface to bind                        |
 * | `SERVER_PORT`  | `3000`    | Port to bind                             |
 * | `DATABASE_URL` | unset     | PostgreSQL URL; unset means in-memory    |
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. An
 * unparsable port falls back to the default, and an unreachable database
 * falls back to the in-memory store.
 */

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::forms::{MemoryFormStore, PgFormStore, SharedFormStore};

/// Default port, matching the `dataUrl` default of the selector widget
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = match std::env::var("SERVER_HOST") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_HOST '{}', using {}", value, defaults.host);
                defaults.host
            }),
            Err(_) => defaults.host,
        };

        let port = match std::env::var("SERVER_PORT") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_PORT '{}', using {}", value, defaults.port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host,
            port,
            database_url,
        }
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if the connection fails
pub async fn load_database(database_url: &str) -> Option<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Pick the form store for this configuration
///
/// PostgreSQL when `DATABASE_URL` is set and reachable, otherwise an
/// in-memory store whose contents are lost on restart.
pub async fn load_store(config: &ServerConfig) -> SharedFormStore {
    if let Some(url) = &config.database_url {
        if let Some(pool) = load_database(url).await {
            return Arc::new(PgFormStore::new(pool));
        }
        tracing::warn!("Database unavailable, falling back to in-memory form store");
    } else {
        tracing::warn!("DATABASE_URL not set. Forms will be kept in memory only.");
    }

    Arc::new(MemoryFormStore::new())
}
