//! `leadflow report` - regenerate the report CSVs from the stored leads.

use anyhow::{Context, Result};
use leadflow::reports::write_reports;
use leadflow_protocol::PipelineConfig;

use super::output::print_json;

#[derive(Debug, clap::Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReportArgs, config: PipelineConfig) -> Result<()> {
    super::runtime()?.block_on(run_async(args, config))
}

async fn run_async(args: ReportArgs, config: PipelineConfig) -> Result<()> {
    let store = super::open_store(&config).await?;
    let files = write_reports(&store, &config.paths.reports)
        .await
        .context("Failed to generate reports")?;
    store.close().await;

    if args.json {
        print_json(&files)?;
    } else {
        println!("{}", files.leads_by_status.display());
        println!("{}", files.leads_by_industry.display());
        println!("{}", files.data_quality.display());
    }
    Ok(())
}
