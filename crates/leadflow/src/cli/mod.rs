//! CLI commands for leadflow
//!
//! Each command builds its own single-threaded runtime; the pipeline
//! processes one file at a time.

pub mod config;
pub mod db;
pub mod error;
pub mod output;
pub mod report;
pub mod run;
pub mod validate;

use anyhow::Result;
use leadflow::LeadStore;
use leadflow_db::DbConfig;
use leadflow_protocol::PipelineConfig;

use error::HelpfulError;

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Open the configured lead store, creating the schema if needed.
pub(crate) async fn open_store(config: &PipelineConfig) -> Result<LeadStore> {
    let db_config = DbConfig::try_from(&config.database)
        .map_err(|e| HelpfulError::database_unavailable(&config.database.url, &e.to_string()))?;
    let store = LeadStore::open(&db_config)
        .await
        .map_err(|e| HelpfulError::database_unavailable(&config.database.url, &e.to_string()))?;
    Ok(store)
}
