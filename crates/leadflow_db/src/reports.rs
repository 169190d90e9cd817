//! Aggregate queries behind the daily and data-quality reports.

use serde::Serialize;

use crate::error::Result;
use crate::LeadStore;

/// One group of a GROUP BY count. `key` is `None` for NULL groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct GroupCount {
    pub key: Option<String>,
    pub count: i64,
}

/// A named data-quality measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct QualityMetric {
    pub metric: String,
    pub value: i64,
}

impl LeadStore {
    /// Lead count per status.
    pub async fn leads_by_status(&self) -> Result<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT status AS key, COUNT(*) AS count FROM leads GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Lead count per industry; leads without one are grouped under `None`.
    pub async fn leads_by_industry(&self) -> Result<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT industry AS key, COUNT(*) AS count FROM leads GROUP BY industry ORDER BY industry",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Table-level completeness metrics.
    pub async fn data_quality(&self) -> Result<Vec<QualityMetric>> {
        let rows = sqlx::query_as::<_, QualityMetric>(
            r#"SELECT 'Total Rows' AS metric, COUNT(*) AS value FROM leads
               UNION ALL
               SELECT 'Rows by Status' AS metric, COUNT(*) AS value
               FROM leads WHERE status IS NOT NULL
               UNION ALL
               SELECT 'Rows without Industry' AS metric, COUNT(*) AS value
               FROM leads WHERE industry IS NULL OR industry = ''"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
