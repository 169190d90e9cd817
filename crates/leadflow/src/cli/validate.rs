//! `leadflow validate` - dry run of one file: no storage, no moves.

use anyhow::{Context, Result};
use leadflow_protocol::{LeadField, PipelineConfig, RowError};
use leadflow_sinks::read_leads;
use leadflow_validation::{partition, LeadValidator};
use serde::Serialize;
use std::path::PathBuf;

use super::error::HelpfulError;
use super::output::{print_json, print_table};

#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// CSV file to check
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    file: &'a PathBuf,
    total: usize,
    valid: usize,
    invalid: usize,
    ignored_columns: &'a [String],
    errors: &'a [RowError],
}

pub fn run(args: ValidateArgs, config: &PipelineConfig) -> Result<()> {
    if !args.file.is_file() {
        return Err(HelpfulError::file_not_found(&args.file).into());
    }

    let lead_file = read_leads(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let validator = LeadValidator::new(&config.validation);
    let outcome = partition(&validator, lead_file.records);

    if args.json {
        return print_json(&ValidateOutput {
            file: &args.file,
            total: outcome.total,
            valid: outcome.valid.len(),
            invalid: outcome.invalid.len(),
            ignored_columns: &lead_file.ignored_columns,
            errors: &outcome.errors,
        });
    }

    if !outcome.errors.is_empty() {
        print_table(
            &["Row", "Company", "Email", "Errors"],
            outcome
                .errors
                .iter()
                .map(|e| {
                    vec![
                        e.row_number.to_string(),
                        e.record.value(LeadField::CompanyName).to_string(),
                        e.record.value(LeadField::Email).to_string(),
                        e.messages.join("\n"),
                    ]
                })
                .collect(),
        );
        println!();
    }

    if !lead_file.ignored_columns.is_empty() {
        println!("Ignored columns: {}", lead_file.ignored_columns.join(", "));
    }
    println!(
        "{}: {} rows, {} valid, {} invalid",
        args.file.display(),
        outcome.total,
        outcome.valid.len(),
        outcome.invalid.len()
    );
    Ok(())
}
