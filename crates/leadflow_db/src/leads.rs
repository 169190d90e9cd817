//! Lead insert, count and truncate operations.

use chrono::{DateTime, Utc};
use leadflow_protocol::defaults::DEFAULT_LEAD_STATUS;
use leadflow_protocol::{LeadField, LeadRecord, LoadReport, StorageErrorKind, StorageRowError};
use serde::Serialize;
use sqlx::error::ErrorKind;
use tracing::{info, warn};

use crate::error::Result;
use crate::LeadStore;

const INSERT_LEAD: &str = r#"INSERT INTO leads
    (company_name, contact_person, email, industry, status, phone_num, website, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#;

/// A lead as stored in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StoredLead {
    pub id: i64,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub email: String,
    pub industry: Option<String>,
    pub status: String,
    pub phone_num: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeadStore {
    /// Insert `records` in one transaction.
    ///
    /// Row-level rejections (duplicate email, other constraint failures) are
    /// recorded in the report and the remaining rows are still inserted.
    /// Any other error aborts the call and rolls back every row of it.
    pub async fn bulk_insert(&self, records: &[LeadRecord]) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        if records.is_empty() {
            return Ok(report);
        }

        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            let result = sqlx::query(INSERT_LEAD)
                .bind(record.value(LeadField::CompanyName))
                .bind(record.non_empty(LeadField::ContactPerson))
                .bind(record.value(LeadField::Email))
                .bind(record.non_empty(LeadField::Industry))
                .bind(
                    record
                        .non_empty(LeadField::Status)
                        .unwrap_or(DEFAULT_LEAD_STATUS),
                )
                .bind(record.non_empty(LeadField::PhoneNum))
                .bind(record.non_empty(LeadField::Website))
                .bind(created_at)
                .execute(&mut *tx)
                .await;

            match result {
                Ok(_) => report.record_loaded(),
                Err(err) => {
                    let Some(kind) = row_failure_kind(&err) else {
                        return Err(err.into());
                    };
                    warn!(
                        row,
                        kind = %kind,
                        data = %record,
                        "Row {}: database error - {}",
                        row,
                        err
                    );
                    report.record_failure(StorageRowError {
                        row,
                        record: record.clone(),
                        reason: err.to_string(),
                        kind,
                    });
                }
            }
        }

        tx.commit().await?;
        info!(
            "Load complete: {} loaded, {} failed",
            report.loaded, report.failed
        );
        Ok(report)
    }

    /// Number of stored leads.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Delete every lead and reset the id sequence.
    pub async fn truncate(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM leads")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'leads'")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(deleted, "Cleared leads table");
        Ok(deleted)
    }

    /// Stored leads ordered by id.
    pub async fn list(&self, limit: i64) -> Result<Vec<StoredLead>> {
        let leads = sqlx::query_as::<_, StoredLead>(
            r#"SELECT id, company_name, contact_person, email, industry, status,
                      phone_num, website, created_at
               FROM leads
               ORDER BY id
               LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }
}

/// Classify a failed insert: `Some` for row-level rejections the load can
/// continue past, `None` for faults that must abort it.
fn row_failure_kind(err: &sqlx::Error) -> Option<StorageErrorKind> {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => Some(StorageErrorKind::Duplicate),
            ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
            | ErrorKind::ForeignKeyViolation => Some(StorageErrorKind::Rejected),
            _ => None,
        },
        _ => None,
    }
}
