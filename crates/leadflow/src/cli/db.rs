//! `leadflow db` - lead table maintenance.

use anyhow::{Context, Result};
use clap::Subcommand;
use leadflow_protocol::PipelineConfig;

use super::output::{print_json, print_table};

#[derive(Subcommand, Debug)]
pub enum DbAction {
    /// Create the leads table if it does not exist
    Init {
        /// Drop and recreate the table (all stored leads are lost)
        #[arg(long)]
        reset: bool,
    },
    /// Show the number of stored leads
    Count {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every stored lead
    Truncate,
    /// List stored leads
    List {
        /// Maximum number of leads to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: DbAction, config: PipelineConfig) -> Result<()> {
    super::runtime()?.block_on(run_async(action, config))
}

async fn run_async(action: DbAction, config: PipelineConfig) -> Result<()> {
    let store = super::open_store(&config).await?;

    match action {
        DbAction::Init { reset } => {
            if reset {
                store
                    .recreate_schema()
                    .await
                    .context("Failed to recreate leads table")?;
                println!("Recreated leads table in {}", config.database.url);
            } else {
                println!("Leads table ready in {}", config.database.url);
            }
        }
        DbAction::Count { json } => {
            let count = store.count().await.context("Failed to count leads")?;
            if json {
                print_json(&serde_json::json!({ "count": count }))?;
            } else {
                println!("{}", count);
            }
        }
        DbAction::Truncate => {
            let deleted = store.truncate().await.context("Failed to truncate leads")?;
            println!("Deleted {} leads", deleted);
        }
        DbAction::List { limit, json } => {
            let leads = store.list(limit).await.context("Failed to list leads")?;
            if json {
                print_json(&leads)?;
            } else if leads.is_empty() {
                println!("No leads stored.");
            } else {
                print_table(
                    &["ID", "Company", "Email", "Industry", "Status", "Created"],
                    leads
                        .iter()
                        .map(|l| {
                            vec![
                                l.id.to_string(),
                                l.company_name.clone(),
                                l.email.clone(),
                                l.industry.clone().unwrap_or_default(),
                                l.status.clone(),
                                l.created_at.format("%Y-%m-%d %H:%M").to_string(),
                            ]
                        })
                        .collect(),
                );
            }
        }
    }

    store.close().await;
    Ok(())
}
