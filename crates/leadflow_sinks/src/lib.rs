//! File-side plumbing for the lead pipeline.
//!
//! - Reading lead CSVs into typed records
//! - Staged artifact writers (`valid_*.csv`, `invalid_*.csv`) that commit by rename
//! - Input discovery and archive/failed moves

use std::path::PathBuf;
use thiserror::Error;

mod artifact;
mod files;
mod reader;

pub use artifact::{artifact_file_name, CsvArtifactSink};
pub use files::{archive_dir_for, archive_file, discover_csv_files, move_into_dir};
pub use reader::{read_leads, read_leads_from, LeadFile};

/// Errors returned while reading, writing or moving files.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing header row in {0}")]
    MissingHeader(PathBuf),

    #[error("Duplicate column '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SinkError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        SinkError::Csv {
            path: path.into(),
            source,
        }
    }
}
