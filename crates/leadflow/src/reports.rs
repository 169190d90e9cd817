//! CSV export of the aggregate reports.
//!
//! Layout under the reports directory:
//! - `daily/leads_by_status.csv`
//! - `daily/leads_by_industry.csv`
//! - `errors/data_quality_report.csv`

use leadflow_db::{GroupCount, QualityMetric};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::pipeline::{PipelineError, Result};
use crate::storage::ReportSource;

pub const LEADS_BY_STATUS: &str = "daily/leads_by_status.csv";
pub const LEADS_BY_INDUSTRY: &str = "daily/leads_by_industry.csv";
pub const DATA_QUALITY: &str = "errors/data_quality_report.csv";

/// Paths of the files written by one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFiles {
    pub leads_by_status: PathBuf,
    pub leads_by_industry: PathBuf,
    pub data_quality: PathBuf,
}

/// Query `source` and write every report under `reports_dir`.
pub async fn write_reports<S: ReportSource + ?Sized>(
    source: &S,
    reports_dir: &Path,
) -> Result<ReportFiles> {
    info!(dir = %reports_dir.display(), "Generating reports");

    let files = ReportFiles {
        leads_by_status: reports_dir.join(LEADS_BY_STATUS),
        leads_by_industry: reports_dir.join(LEADS_BY_INDUSTRY),
        data_quality: reports_dir.join(DATA_QUALITY),
    };

    let by_status = source.leads_by_status().await?;
    write_group_counts(&files.leads_by_status, "status", &by_status)?;

    let by_industry = source.leads_by_industry().await?;
    write_group_counts(&files.leads_by_industry, "industry", &by_industry)?;

    let quality = source.data_quality().await?;
    write_quality(&files.data_quality, &quality)?;

    info!("Reports generated");
    Ok(files)
}

fn write_group_counts(path: &Path, key_column: &str, rows: &[GroupCount]) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer
        .write_record([key_column, "count"])
        .map_err(|e| report_error(path, e))?;
    for row in rows {
        let count = row.count.to_string();
        writer
            .write_record([row.key.as_deref().unwrap_or(""), count.as_str()])
            .map_err(|e| report_error(path, e))?;
    }
    writer.flush().map_err(|e| report_error(path, e.into()))?;
    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_quality(path: &Path, rows: &[QualityMetric]) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer
        .write_record(["metric", "value"])
        .map_err(|e| report_error(path, e))?;
    for row in rows {
        let value = row.value.to_string();
        writer
            .write_record([row.metric.as_str(), value.as_str()])
            .map_err(|e| report_error(path, e))?;
    }
    writer.flush().map_err(|e| report_error(path, e.into()))?;
    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| report_error(path, e.into()))?;
    }
    csv::Writer::from_path(path).map_err(|e| report_error(path, e))
}

fn report_error(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::Report {
        path: path.to_path_buf(),
        source,
    }
}
