//! `leadflow run` - process every file in the input directory.

use anyhow::{Context, Result};
use leadflow::Orchestrator;
use leadflow_protocol::{FileReport, PipelineConfig, RunSummary};
use std::path::PathBuf;

use super::error::HelpfulError;
use super::output::{count_color, display_opt, print_json, print_table, print_table_colored, short_name};

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Input directory (default: paths.input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Skip report generation
    #[arg(long)]
    pub no_reports: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs, config: PipelineConfig) -> Result<()> {
    config
        .ensure_dirs()
        .context("Failed to create pipeline directories")?;

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.paths.input.clone());
    if !input.is_dir() {
        return Err(HelpfulError::input_dir_missing(&input).into());
    }

    super::runtime()?.block_on(run_async(args, input, config))
}

async fn run_async(args: RunArgs, input: PathBuf, config: PipelineConfig) -> Result<()> {
    let store = super::open_store(&config).await?;
    let mut orchestrator = Orchestrator::new(config, store);

    let summary = orchestrator
        .process_all(&input)
        .await
        .with_context(|| format!("Pipeline run failed for {}", input.display()))?;

    let reports = if args.no_reports {
        None
    } else {
        Some(
            orchestrator
                .generate_reports()
                .await
                .context("Failed to generate reports")?,
        )
    };

    if args.json {
        print_json(&serde_json::json!({
            "summary": summary,
            "files": orchestrator.file_reports(),
            "failed": orchestrator.failed_files(),
            "reports": reports,
        }))?;
    } else {
        print_files(orchestrator.file_reports());
        if !orchestrator.failed_files().is_empty() {
            println!();
            print_table(
                &["Failed File", "Error", "Moved To"],
                orchestrator
                    .failed_files()
                    .iter()
                    .map(|f| {
                        vec![
                            short_name(&f.file),
                            f.error.clone(),
                            display_opt(f.moved_to.as_deref()),
                        ]
                    })
                    .collect(),
            );
        }
        println!();
        print_summary(&summary);
        if let Some(reports) = &reports {
            println!();
            println!("Reports:");
            println!("  {}", reports.leads_by_status.display());
            println!("  {}", reports.leads_by_industry.display());
            println!("  {}", reports.data_quality.display());
        }
    }

    orchestrator.into_loader().close().await;
    Ok(())
}

fn print_files(files: &[FileReport]) {
    if files.is_empty() {
        println!("No files processed.");
        return;
    }
    print_table_colored(
        &["File", "Rows", "Loaded", "Failed", "Archived To"],
        files
            .iter()
            .map(|f| {
                vec![
                    (short_name(&f.file), None),
                    (f.total_rows.to_string(), None),
                    (f.loaded.to_string(), None),
                    (f.failed.to_string(), count_color(f.failed as u64)),
                    (display_opt(f.archived_to.as_deref()), None),
                ]
            })
            .collect(),
    );
}

fn print_summary(summary: &RunSummary) {
    print_table_colored(
        &["Metric", "Value"],
        vec![
            vec![
                ("Files processed".to_string(), None),
                (summary.files_processed.to_string(), None),
            ],
            vec![
                ("Files failed".to_string(), None),
                (
                    summary.files_failed.to_string(),
                    count_color(summary.files_failed),
                ),
            ],
            vec![
                ("Rows loaded".to_string(), None),
                (summary.total_rows_loaded.to_string(), None),
            ],
            vec![
                ("Validation errors".to_string(), None),
                (summary.validation_errors.to_string(), None),
            ],
            vec![
                ("Storage errors".to_string(), None),
                (summary.storage_errors.to_string(), None),
            ],
            vec![
                ("Total errors".to_string(), None),
                (
                    summary.total_errors.to_string(),
                    count_color(summary.total_errors),
                ),
            ],
        ],
    );
}
