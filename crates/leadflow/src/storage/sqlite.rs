//! SQLite-backed loader.

use async_trait::async_trait;
use leadflow_db::{GroupCount, LeadStore, QualityMetric, Result};
use leadflow_protocol::{LeadRecord, LoadReport};

use super::traits::{LeadLoader, ReportSource};

#[async_trait]
impl LeadLoader for LeadStore {
    async fn bulk_insert(&self, records: &[LeadRecord]) -> Result<LoadReport> {
        LeadStore::bulk_insert(self, records).await
    }

    async fn truncate(&self) -> Result<u64> {
        LeadStore::truncate(self).await
    }

    async fn count(&self) -> Result<i64> {
        LeadStore::count(self).await
    }
}

#[async_trait]
impl ReportSource for LeadStore {
    async fn leads_by_status(&self) -> Result<Vec<GroupCount>> {
        LeadStore::leads_by_status(self).await
    }

    async fn leads_by_industry(&self) -> Result<Vec<GroupCount>> {
        LeadStore::leads_by_industry(self).await
    }

    async fn data_quality(&self) -> Result<Vec<QualityMetric>> {
        LeadStore::data_quality(self).await
    }
}
