//! Leadflow - lead CSV ingestion.
//!
//! Reads lead files from an input directory, validates every row, loads the
//! valid rows into the lead store, quarantines the rest and archives the
//! originals. See [`pipeline::Orchestrator`].

pub mod pipeline;
pub mod reports;
pub mod storage;

pub use leadflow_protocol as protocol;
pub use pipeline::{Orchestrator, PipelineError};
pub use storage::{LeadLoader, LeadStore, ReportSource};
