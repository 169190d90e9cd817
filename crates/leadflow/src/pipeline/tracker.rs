use leadflow_protocol::FileState;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{PipelineError, Result};

/// Current lifecycle state of one input file, with checked transitions.
#[derive(Debug)]
pub(crate) struct FileTracker {
    file: PathBuf,
    state: FileState,
    history: Vec<FileState>,
}

impl FileTracker {
    pub(crate) fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            state: FileState::Discovered,
            history: vec![FileState::Discovered],
        }
    }

    pub(crate) fn state(&self) -> FileState {
        self.state
    }

    pub(crate) fn history(&self) -> &[FileState] {
        &self.history
    }

    pub(crate) fn advance(&mut self, to: FileState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(PipelineError::InvalidTransition {
                file: self.file.clone(),
                from: self.state,
                to,
            });
        }
        debug!(file = %self.file.display(), from = %self.state, to = %to, "File state change");
        self.state = to;
        self.history.push(to);
        Ok(())
    }

    /// Move to `Failed` unless the file already reached a terminal state.
    pub(crate) fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = FileState::Failed;
            self.history.push(FileState::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_records_history() {
        let mut tracker = FileTracker::new(Path::new("leads.csv"));
        tracker.advance(FileState::Partitioned).unwrap();
        tracker.advance(FileState::Quarantined).unwrap();
        tracker.advance(FileState::Archived).unwrap();
        assert_eq!(
            tracker.history(),
            &[
                FileState::Discovered,
                FileState::Partitioned,
                FileState::Quarantined,
                FileState::Archived
            ]
        );
    }

    #[test]
    fn test_tracker_rejects_skipped_step() {
        let mut tracker = FileTracker::new(Path::new("leads.csv"));
        let err = tracker.advance(FileState::Loaded).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidTransition {
                from: FileState::Discovered,
                to: FileState::Loaded,
                ..
            }
        ));
        assert_eq!(tracker.state(), FileState::Discovered);
    }

    #[test]
    fn test_fail_is_absorbing() {
        let mut tracker = FileTracker::new(Path::new("leads.csv"));
        tracker.fail();
        tracker.fail();
        assert_eq!(tracker.state(), FileState::Failed);
        assert_eq!(tracker.history().len(), 2);
        assert!(tracker.advance(FileState::Partitioned).is_err());
    }
}
