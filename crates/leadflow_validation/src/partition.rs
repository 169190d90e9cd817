use leadflow_protocol::{LeadRecord, RowError};
use tracing::debug;

use crate::LeadValidator;

/// Valid/invalid split of one file's records.
///
/// Both sequences keep the relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Records that passed every rule, slated for loading.
    pub valid: Vec<LeadRecord>,
    /// Source row number (1-based) of each entry in `valid`.
    pub valid_rows: Vec<usize>,
    /// Records with at least one violation, slated for quarantine.
    pub invalid: Vec<LeadRecord>,
    /// One entry per invalid record, in the same order as `invalid`.
    pub errors: Vec<RowError>,
    pub total: usize,
    /// Rows accepted for loading.
    pub loaded: usize,
    /// Rows rejected by validation.
    pub failed: usize,
}

impl PartitionOutcome {
    pub fn has_valid(&self) -> bool {
        !self.valid.is_empty()
    }

    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }

    /// Source row number for the `index`-th valid record (0-based).
    pub fn source_row(&self, index: usize) -> Option<usize> {
        self.valid_rows.get(index).copied()
    }
}

/// Validate every record and split the sequence into valid and invalid rows.
///
/// Row numbers are 1-based and follow input order.
pub fn partition<I>(validator: &LeadValidator, records: I) -> PartitionOutcome
where
    I: IntoIterator<Item = LeadRecord>,
{
    let mut outcome = PartitionOutcome::default();

    for (idx, record) in records.into_iter().enumerate() {
        let row_number = idx + 1;
        outcome.total += 1;

        let result = validator.validate(&record);
        if result.is_valid() {
            outcome.valid.push(record);
            outcome.valid_rows.push(row_number);
            outcome.loaded += 1;
        } else {
            debug!(row = row_number, violations = result.messages().len(), "Row failed validation");
            outcome.errors.push(RowError {
                row_number,
                record: record.clone(),
                messages: result.into_messages(),
            });
            outcome.invalid.push(record);
            outcome.failed += 1;
        }
    }

    outcome
}
