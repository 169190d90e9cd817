//! Lead validation engine.
//!
//! Pure logic, no storage or filesystem access:
//! - [`LeadValidator`] evaluates one record against every rule
//! - [`partition`] splits a file's records into valid and invalid sets

mod partition;
pub mod rules;
mod validator;

pub use partition::{partition, PartitionOutcome};
pub use validator::LeadValidator;
