use chrono::Local;
use leadflow_protocol::defaults::{INVALID_ARTIFACT_PREFIX, VALID_ARTIFACT_PREFIX};
use leadflow_protocol::{FileReport, FileState, LoadReport, PipelineConfig, RunSummary};
use leadflow_sinks::{
    archive_file, artifact_file_name, discover_csv_files, move_into_dir, read_leads,
    CsvArtifactSink, LeadFile,
};
use leadflow_validation::{partition, LeadValidator};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::error::{PipelineError, Result};
use super::tracker::FileTracker;
use crate::reports::{write_reports, ReportFiles};
use crate::storage::{LeadLoader, ReportSource};

/// A file that ended in the `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub file: PathBuf,
    pub error: String,
    /// Where the original ended up, if it could be moved.
    pub moved_to: Option<PathBuf>,
}

/// Drives input files through validation, loading and archival.
///
/// Files are processed one at a time. Run totals live here and are reset
/// only by constructing a new orchestrator.
pub struct Orchestrator<L> {
    config: PipelineConfig,
    validator: LeadValidator,
    loader: L,
    summary: RunSummary,
    processed: Vec<FileReport>,
    failed: Vec<FailedFile>,
}

impl<L: LeadLoader> Orchestrator<L> {
    pub fn new(config: PipelineConfig, loader: L) -> Self {
        let validator = LeadValidator::new(&config.validation);
        Self {
            config,
            validator,
            loader,
            summary: RunSummary::default(),
            processed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Snapshot of the run totals.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Reports of files that were archived, in processing order.
    pub fn file_reports(&self) -> &[FileReport] {
        &self.processed
    }

    pub fn failed_files(&self) -> &[FailedFile] {
        &self.failed
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    /// Process every `*.csv` file in `input_dir`, in file-name order.
    ///
    /// A file that fails is moved to the failed directory and the run goes
    /// on. Only an unreadable input directory fails the run.
    pub async fn process_all(&mut self, input_dir: &Path) -> Result<RunSummary> {
        let files = discover_csv_files(input_dir)?;
        if files.is_empty() {
            info!(dir = %input_dir.display(), "No CSV files to process");
        } else {
            info!(dir = %input_dir.display(), "Found {} CSV files to process", files.len());
        }

        for file in files {
            // Errors are already logged and recorded by process_file
            let _ = self.process_file(&file).await;
        }

        info!(
            files_processed = self.summary.files_processed,
            files_failed = self.summary.files_failed,
            total_rows_loaded = self.summary.total_rows_loaded,
            total_errors = self.summary.total_errors,
            "Run complete"
        );
        Ok(self.summary)
    }

    /// Validate, load and archive one file.
    ///
    /// On error the staged artifacts are discarded, the original is moved to
    /// the failed directory and `files_failed` is incremented.
    pub async fn process_file(&mut self, path: &Path) -> Result<FileReport> {
        let mut tracker = FileTracker::new(path);
        let limit = self.config.file_timeout();

        let result = match tokio::time::timeout(limit, self.run_file(path, &mut tracker)).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::Timeout {
                file: path.to_path_buf(),
                elapsed: limit,
            }),
        };

        match result {
            Ok(report) => {
                self.summary.files_processed += 1;
                debug!(file = %path.display(), states = ?tracker.history(), "File lifecycle");
                self.processed.push(report.clone());
                Ok(report)
            }
            Err(err) => {
                error!(file = %path.display(), state = %tracker.state(), "Error processing file: {}", err);
                tracker.fail();
                let moved_to = self.move_to_failed(path);
                self.summary.files_failed += 1;
                self.failed.push(FailedFile {
                    file: path.to_path_buf(),
                    error: err.to_string(),
                    moved_to,
                });
                Err(err)
            }
        }
    }

    async fn run_file(&mut self, path: &Path, tracker: &mut FileTracker) -> Result<FileReport> {
        info!(file = %path.display(), "Processing file");

        let LeadFile {
            header,
            rows,
            records,
            ..
        } = read_leads(path)?;

        let outcome = partition(&self.validator, records);
        tracker.advance(FileState::Partitioned)?;
        for row_error in &outcome.errors {
            warn!(
                file = %path.display(),
                row = row_error.row_number,
                data = %row_error.record,
                "Row {}: validation errors - {}",
                row_error.row_number,
                row_error.messages.join("; ")
            );
        }

        // Dropped uncommitted on any early return, which removes the temp files
        let mut valid_sink = if outcome.has_valid() {
            let name = artifact_file_name(VALID_ARTIFACT_PREFIX, path)?;
            Some(CsvArtifactSink::stage(
                &self.config.paths.processed,
                &name,
                &header,
                source_rows(&rows, outcome.valid_rows.iter().copied()),
            )?)
        } else {
            None
        };
        let mut invalid_sink = if outcome.has_invalid() {
            let name = artifact_file_name(INVALID_ARTIFACT_PREFIX, path)?;
            Some(CsvArtifactSink::stage(
                &self.config.paths.failed,
                &name,
                &header,
                source_rows(&rows, outcome.errors.iter().map(|e| e.row_number)),
            )?)
        } else {
            None
        };

        let mut report = FileReport::new(path);
        report.total_rows = outcome.total;

        let mut load = LoadReport::default();
        if outcome.has_valid() {
            load = self.loader.bulk_insert(&outcome.valid).await?;
            // Batch positions -> source row numbers
            for storage_error in &mut load.errors {
                if let Some(row) = storage_error
                    .row
                    .checked_sub(1)
                    .and_then(|idx| outcome.source_row(idx))
                {
                    storage_error.row = row;
                }
                warn!(
                    file = %path.display(),
                    row = storage_error.row,
                    kind = %storage_error.kind,
                    data = %storage_error.record,
                    "Row {}: not loaded - {}",
                    storage_error.row,
                    storage_error.reason
                );
            }
        }

        // Rows are in the store now; count them even if a later step fails
        self.summary
            .add_rows(load.loaded, outcome.failed as u64, load.failed);
        report.loaded = load.loaded as usize;
        report.failed = outcome.failed + load.failed as usize;
        report.storage_errors = load.errors;
        report.validation_errors = outcome.errors;

        if let Some(sink) = valid_sink.as_mut() {
            report.valid_artifact = Some(sink.commit()?);
            tracker.advance(FileState::Loaded)?;
        }

        if let Some(sink) = invalid_sink.as_mut() {
            report.invalid_artifact = Some(sink.commit()?);
            tracker.advance(FileState::Quarantined)?;
        }

        let archived_to = archive_file(path, &self.config.paths.archive, Local::now().date_naive())?;
        report.archived_to = Some(archived_to);
        tracker.advance(FileState::Archived)?;

        info!(
            file = %path.display(),
            total = report.total_rows,
            loaded = report.loaded,
            failed = report.failed,
            "Processed {}: {} loaded, {} failed",
            path.display(),
            report.loaded,
            report.failed
        );
        Ok(report)
    }

    fn move_to_failed(&self, path: &Path) -> Option<PathBuf> {
        if !path.exists() {
            return None;
        }
        match move_into_dir(path, &self.config.paths.failed) {
            Ok(dest) => {
                info!(file = %path.display(), dest = %dest.display(), "Moved file to failed directory");
                Some(dest)
            }
            Err(err) => {
                error!(file = %path.display(), "Could not move file to failed directory: {}", err);
                None
            }
        }
    }
}

/// Input rows by 1-based row number, unchanged and with every column.
fn source_rows<'a>(
    rows: &'a [Vec<String>],
    numbers: impl IntoIterator<Item = usize> + 'a,
) -> impl Iterator<Item = &'a [String]> + 'a {
    numbers
        .into_iter()
        .filter_map(move |n| rows.get(n.checked_sub(1)?))
        .map(Vec::as_slice)
}

impl<L: LeadLoader + ReportSource> Orchestrator<L> {
    /// Write the aggregate report CSVs under the configured reports directory.
    pub async fn generate_reports(&self) -> Result<ReportFiles> {
        write_reports(&self.loader, &self.config.paths.reports).await
    }
}
