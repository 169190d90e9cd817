//! File-level pipeline.
//!
//! For each input file:
//!
//! ```text
//! Discovered -> Partitioned -> Loaded -> Quarantined -> Archived
//!                     \            \           \
//!                      +------------+-----------+--> Failed
//! ```
//!
//! `Loaded` is skipped when a file has no valid rows and `Quarantined` when
//! it has no invalid rows. `valid_<name>` is written to the processed
//! directory, `invalid_<name>` to the failed directory, and the original is
//! moved to `<archive>/<YYYYMMDD>/`. A failed file is moved to the failed
//! directory as-is.

mod error;
mod orchestrator;
mod tracker;

pub use error::{PipelineError, Result};
pub use orchestrator::{FailedFile, Orchestrator};
