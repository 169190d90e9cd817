//! Leadflow command-line launcher
//!
//! - `run`: validate, load and archive every file in the input directory
//! - `validate`: dry run of one file
//! - `db`, `report`, `config`: maintenance and inspection

use anyhow::Result;
use clap::{Parser, Subcommand};
use leadflow_logging::{init_logging, LogConfig};
use leadflow_protocol::PipelineConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::error::HelpfulError;

#[derive(Parser, Debug)]
#[command(name = "leadflow", version, about = "Validate, load and archive lead CSV files")]
struct Cli {
    /// Enable verbose logging (debug to stderr and log file)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Configuration file (default: $LEADFLOW_CONFIG, then ./leadflow.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process every CSV file in the input directory
    Run(cli::run::RunArgs),

    /// Check one file without loading or moving it
    Validate(cli::validate::ValidateArgs),

    /// Lead table maintenance
    Db {
        #[command(subcommand)]
        action: cli::db::DbAction,
    },

    /// Regenerate report CSVs from stored leads
    Report(cli::report::ReportArgs),

    /// Show the resolved configuration
    Config(cli::config::ConfigArgs),
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Run(args) => args.json,
        Commands::Validate(args) => args.json,
        Commands::Report(args) => args.json,
        Commands::Config(args) => args.json,
        Commands::Db { action } => matches!(
            action,
            cli::db::DbAction::Count { json: true } | cli::db::DbAction::List { json: true, .. }
        ),
    }
}

fn run_command(command: Commands, config: PipelineConfig) -> Result<()> {
    match command {
        Commands::Run(args) => cli::run::run(args, config),
        Commands::Validate(args) => cli::validate::run(args, &config),
        Commands::Db { action } => cli::db::run(action, config),
        Commands::Report(args) => cli::report::run(args, config),
        Commands::Config(args) => cli::config::run(args, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    let config = match PipelineConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let err: anyhow::Error = HelpfulError::invalid_config(&err.to_string()).into();
            report_error(&err, json_mode);
            return ExitCode::from(1);
        }
    };

    let _log_guard = match init_logging(LogConfig {
        app_name: "leadflow",
        log_dir: config.paths.logs.clone(),
        verbose: cli.verbose,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: file logging disabled: {:#}", err);
            None
        }
    };

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            report_error(&err, json_mode);
            ExitCode::from(1)
        }
    }
}

fn report_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        cli::error::print_json_error(err);
    } else if err.downcast_ref::<HelpfulError>().is_some() {
        eprint!("{}", err);
    } else {
        eprintln!("{:?}", err);
    }
}
