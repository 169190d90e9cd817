//! Per-file lifecycle and run-level bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::types::{RowError, StorageRowError};

// ============================================================================
// File state
// ============================================================================

/// Lifecycle of one input file within a run.
///
/// `Discovered -> Partitioned -> {Loaded, Quarantined} -> Archived`, with
/// `Failed` reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Discovered,
    Partitioned,
    Loaded,
    Quarantined,
    Archived,
    Failed,
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::Discovered => "discovered",
            FileState::Partitioned => "partitioned",
            FileState::Loaded => "loaded",
            FileState::Quarantined => "quarantined",
            FileState::Archived => "archived",
            FileState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FileState::Archived | FileState::Failed)
    }

    /// States reachable in one step.
    ///
    /// A file with both valid and invalid rows goes through `Loaded` and then
    /// `Quarantined`; a file with no rows at all goes straight to `Archived`.
    pub fn valid_transitions(&self) -> &'static [FileState] {
        match self {
            FileState::Discovered => &[FileState::Partitioned, FileState::Failed],
            FileState::Partitioned => &[
                FileState::Loaded,
                FileState::Quarantined,
                FileState::Archived,
                FileState::Failed,
            ],
            FileState::Loaded => &[
                FileState::Quarantined,
                FileState::Archived,
                FileState::Failed,
            ],
            FileState::Quarantined => &[FileState::Archived, FileState::Failed],
            FileState::Archived | FileState::Failed => &[],
        }
    }

    pub fn can_transition_to(&self, target: FileState) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Reports
// ============================================================================

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub total_rows: usize,
    /// Rows persisted by the store.
    pub loaded: usize,
    /// Rows rejected by validation or by the store.
    pub failed: usize,
    pub validation_errors: Vec<RowError>,
    pub storage_errors: Vec<StorageRowError>,
    pub valid_artifact: Option<PathBuf>,
    pub invalid_artifact: Option<PathBuf>,
    pub archived_to: Option<PathBuf>,
}

impl FileReport {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            total_rows: 0,
            loaded: 0,
            failed: 0,
            validation_errors: Vec::new(),
            storage_errors: Vec::new(),
            valid_artifact: None,
            invalid_artifact: None,
            archived_to: None,
        }
    }
}

/// Cumulative counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_processed: u64,
    pub files_failed: u64,
    pub total_rows_loaded: u64,
    /// `validation_errors + storage_errors`.
    pub total_errors: u64,
    pub validation_errors: u64,
    pub storage_errors: u64,
}

impl RunSummary {
    /// Fold one file's row counts into the run totals.
    ///
    /// `files_processed` is counted separately, once the file is archived.
    pub fn add_rows(&mut self, loaded: u64, validation_errors: u64, storage_errors: u64) {
        self.total_rows_loaded += loaded;
        self.validation_errors += validation_errors;
        self.storage_errors += storage_errors;
        self.total_errors = self.validation_errors + self.storage_errors;
    }
}
