//! Shared data model for the lead ingestion pipeline.
//!
//! Everything that crosses a crate boundary lives here: the typed lead
//! record, validation and load results, per-file lifecycle and run
//! counters, and the pipeline configuration.

pub mod config;
pub mod defaults;
pub mod pipeline;
pub mod types;

pub use config::{
    ConfigError, DatabaseConfig, PathsConfig, PipelineConfig, PipelineSettings, ValidationConfig,
};
pub use pipeline::{FileReport, FileState, RunSummary};
pub use types::{
    LeadField, LeadRecord, LoadReport, RowError, StorageErrorKind, StorageRowError,
    ValidationResult,
};
