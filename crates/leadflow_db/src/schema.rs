//! Schema creation for the `leads` table.
//!
//! All CREATE TABLE statements live here - single source of truth.

use tracing::{info, warn};

use crate::error::Result;
use crate::LeadStore;

pub(crate) const LEADS_TABLE: &str = "leads";

const CREATE_LEADS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name TEXT NOT NULL,
    contact_person TEXT,
    email TEXT NOT NULL UNIQUE,
    industry TEXT,
    status TEXT NOT NULL DEFAULT 'New',
    phone_num TEXT,
    website TEXT,
    created_at TEXT NOT NULL
)"#;

impl LeadStore {
    /// Ensure the leads table and its indexes exist.
    pub(crate) async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_LEADS_TABLE).execute(&self.pool).await?;

        // Report queries group by these
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_industry ON leads(industry)")
            .execute(&self.pool)
            .await?;

        info!(table = LEADS_TABLE, "Database schema verified");
        Ok(())
    }

    /// Drop and recreate the leads table. All stored leads are lost.
    pub async fn recreate_schema(&self) -> Result<()> {
        warn!(table = LEADS_TABLE, "Dropping table");
        sqlx::query("DROP TABLE IF EXISTS leads")
            .execute(&self.pool)
            .await?;
        self.ensure_schema().await
    }
}
