//! Connection pool creation.
//!
//! The store is SQLite-only; the URL scheme is checked up front so that a
//! misconfigured `database.url` fails with a readable error instead of a
//! driver panic.

use leadflow_protocol::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use tracing::info;

use crate::error::{DbError, Result};

/// Database pool type alias.
pub type DbPool = sqlx::SqlitePool;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum connections in the pool
    pub max_connections: u32,
}

impl DbConfig {
    /// Create SQLite configuration for a database file (created if missing).
    pub fn sqlite(path: impl AsRef<str>) -> Self {
        Self {
            url: format!("sqlite:{}?mode=rwc", path.as_ref()),
            max_connections: 5,
        }
    }

    /// Create in-memory SQLite configuration (for testing).
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Create configuration from a URL.
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !url.starts_with("sqlite:") {
            return Err(DbError::invalid_url(format!(
                "{} (only sqlite: URLs are supported)",
                url
            )));
        }
        Ok(Self {
            url,
            max_connections: 5,
        })
    }

    /// Set maximum connections.
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Every connection to `:memory:` opens a separate database, so an
    /// in-memory pool must hold exactly one connection for its lifetime.
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl TryFrom<&DatabaseConfig> for DbConfig {
    type Error = DbError;

    fn try_from(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::from_url(config.url.clone())?.with_max_connections(config.max_connections))
    }
}

/// Create a database pool from configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool> {
    let mut options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if config.is_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        // WAL mode for better concurrent access, NORMAL sync for throughput
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?
    };

    info!(url = %config.url, "Connected to SQLite database");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let result = DbConfig::from_url("postgres://localhost/crm_dev");
        assert!(matches!(result, Err(DbError::InvalidUrl(_))));
    }

    #[test]
    fn test_memory_detection() {
        assert!(DbConfig::sqlite_memory().is_memory());
        assert!(!DbConfig::sqlite("leads.sqlite3").is_memory());
    }

    #[test]
    fn test_from_database_config() {
        let config = DatabaseConfig {
            url: "sqlite:crm.sqlite3".to_string(),
            max_connections: 3,
        };
        let db = DbConfig::try_from(&config).unwrap();
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.url, "sqlite:crm.sqlite3");
    }

    #[tokio::test]
    async fn test_sqlite_memory_pool() {
        let pool = create_pool(&DbConfig::sqlite_memory()).await;
        assert!(pool.is_ok());
    }
}
