//! # Database Connection Pool Module
//!
//! SQLite connection pooling for the form library.
//!
//! - **WAL mode** for concurrent readers alongside the sync writer
//! - **Foreign keys** enforced
//! - **Automatic migrations** on pool creation
//!
//! For tests, use [`create_test_pool`] which backs the pool with a single
//! in-memory connection.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{FormsError, Result};

/// Database configuration for the SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (`sqlite:<path>` or `sqlite::memory:`)
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Maximum time to wait for a connection from the pool
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Configuration for an on-disk database at `database_path`.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        let path = database_path.into();
        Self {
            database_url: format!("sqlite:{}", path.display()),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Configuration for an in-memory database.
    ///
    /// Capped at one connection: each in-memory connection is its own
    /// database, so a larger pool would fracture state across connections.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Create a connection pool and run pending migrations.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| FormsError::Migration(e.to_string()))?;

    info!(url = %config.database_url, "Form library database ready");
    Ok(pool)
}

/// Create an in-memory pool for tests.
pub async fn create_test_pool() -> Result<SqlitePool> {
    create_pool(DatabaseConfig::in_memory()).await
}
