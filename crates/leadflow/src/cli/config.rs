//! `leadflow config` - show the resolved configuration.

use anyhow::Result;
use leadflow_protocol::PipelineConfig;

use super::output::print_json;

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show resolved configuration in JSON format
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, config: &PipelineConfig) -> Result<()> {
    if args.json {
        let paths = &config.paths;
        return print_json(&serde_json::json!({
            "config": config,
            "exists": {
                "input": paths.input.is_dir(),
                "processed": paths.processed.is_dir(),
                "failed": paths.failed.is_dir(),
                "archive": paths.archive.is_dir(),
                "reports": paths.reports.is_dir(),
                "logs": paths.logs.is_dir(),
            },
        }));
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
