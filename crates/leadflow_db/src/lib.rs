//! Lead storage for the ingestion pipeline.
//!
//! The store is the only place that talks SQL. The pipeline uses it through
//! the loader interface; the CLI uses it directly for maintenance commands.
//!
//! # Usage
//!
//! ```rust,ignore
//! use leadflow_db::{DbConfig, LeadStore};
//!
//! let store = LeadStore::open(&DbConfig::sqlite("crm_dev.sqlite3")).await?;
//! let report = store.bulk_insert(&records).await?;
//! println!("{} loaded, {} failed", report.loaded, report.failed);
//! store.close().await;
//! ```

mod error;
mod leads;
mod pool;
mod reports;
mod schema;

pub use error::{DbError, Result};
pub use leads::StoredLead;
pub use pool::{create_pool, DbConfig, DbPool};
pub use reports::{GroupCount, QualityMetric};

use tracing::info;

/// Handle to the leads table.
///
/// Cloning shares the underlying pool. The pool is released when the last
/// clone is dropped; `close` waits for connections to shut down cleanly.
#[derive(Clone)]
pub struct LeadStore {
    pool: DbPool,
}

impl LeadStore {
    /// Connect and make sure the schema exists.
    pub async fn open(config: &DbConfig) -> Result<Self> {
        let pool = create_pool(config).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        info!(url = %config.url, "Lead store opened");
        Ok(store)
    }

    /// Fresh in-memory store (for testing).
    pub async fn open_in_memory() -> Result<Self> {
        Self::open(&DbConfig::sqlite_memory()).await
    }

    /// Close the database connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_database() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("leads.sqlite3");

        let store = LeadStore::open(&DbConfig::sqlite(db_path.display().to_string()))
            .await
            .unwrap();
        assert!(db_path.exists());
        assert_eq!(store.count().await.unwrap(), 0);

        store.close().await;
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        use leadflow_protocol::{LeadField, LeadRecord};

        let tmp = TempDir::new().unwrap();
        let config = DbConfig::sqlite(tmp.path().join("leads.sqlite3").display().to_string());

        let store = LeadStore::open(&config).await.unwrap();
        let record = LeadRecord::new()
            .with(LeadField::CompanyName, "Acme")
            .with(LeadField::Email, "a@acme.com");
        store.bulk_insert(&[record]).await.unwrap();
        store.close().await;

        let store = LeadStore::open(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        store.close().await;
    }
}
