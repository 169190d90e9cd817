//! Storage interfaces the pipeline is written against.

use async_trait::async_trait;
use leadflow_db::{GroupCount, QualityMetric, Result};
use leadflow_protocol::{LeadRecord, LoadReport};

/// Destination for validated leads.
///
/// Row-level rejections belong in the returned `LoadReport`; an `Err` means
/// the store itself failed and nothing from the call can be trusted.
#[async_trait]
pub trait LeadLoader: Send + Sync {
    /// Insert `records`, reporting per-row outcomes.
    async fn bulk_insert(&self, records: &[LeadRecord]) -> Result<LoadReport>;

    /// Remove every stored lead. Returns the number removed.
    async fn truncate(&self) -> Result<u64>;

    /// Number of stored leads.
    async fn count(&self) -> Result<i64>;
}

/// Aggregates behind the CSV reports.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn leads_by_status(&self) -> Result<Vec<GroupCount>>;

    async fn leads_by_industry(&self) -> Result<Vec<GroupCount>>;

    async fn data_quality(&self) -> Result<Vec<QualityMetric>>;
}
