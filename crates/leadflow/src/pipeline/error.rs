use leadflow_db::DbError;
use leadflow_protocol::{ConfigError, FileState};
use leadflow_sinks::SinkError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that fail a file or a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    #[error("Report error in {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Timed out after {}s processing {}", .elapsed.as_secs(), .file.display())]
    Timeout { file: PathBuf, elapsed: Duration },

    #[error("Invalid transition for {}: {from} -> {to}", .file.display())]
    InvalidTransition {
        file: PathBuf,
        from: FileState,
        to: FileState,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
