//! Storage seam between the pipeline and the lead store.
//!
//! The orchestrator is generic over [`LeadLoader`]; [`LeadStore`] is the
//! production implementation.

mod sqlite;
mod traits;

pub use leadflow_db::LeadStore;
pub use traits::{LeadLoader, ReportSource};
