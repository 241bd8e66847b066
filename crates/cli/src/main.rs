// Shelflife CLI - branch inventory reconciliation dashboard (demo data)

mod exit_codes;
mod render;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_PIPELINE, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE};
use session::Session;
use shelflife_recon::PipelineConfig;
use shelflife_store::InventoryStore;
use shelflife_synth::generate::GenConfig;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Branch inventory reconciliation dashboard (demo data)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull fresh branch feeds, reconcile, and render the dashboard
    #[command(after_help = "\
Examples:
  shelf dashboard
  shelf dashboard --rows 20 --seed 7
  shelf dashboard --json
  shelf dashboard --config branches.toml --output run.json")]
    Dashboard {
        /// Rows to generate per branch
        #[arg(long, default_value_t = 50)]
        rows: usize,

        /// Pin the generator RNG for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Pipeline config TOML (omit for the built-in two-branch config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output the full run result as JSON instead of the dashboard
        #[arg(long)]
        json: bool,

        /// Write the JSON result to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a pipeline config without running
    #[command(after_help = "\
Examples:
  shelf validate branches.toml")]
    Validate {
        /// Path to the pipeline config TOML
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dashboard { rows, seed, config, json, output } => {
            cmd_dashboard(rows, seed, config, json, output)
        }
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    fn invalid_config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn pipeline(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PIPELINE, message: msg.into(), hint: None }
    }

    fn store(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORE, message: msg.into(), hint: None }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig, CliError> {
    match path {
        None => Ok(PipelineConfig::builtin()),
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .map_err(|e| CliError::usage(format!("cannot read {}: {e}", path.display())))?;
            PipelineConfig::from_toml(&config_str).map_err(|e| CliError::invalid_config(e.to_string()))
        }
    }
}

fn cmd_dashboard(
    rows: usize,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_ref())?;

    let mut session = Session::new(config, GenConfig { rows_per_branch: rows, seed });
    session.regenerate().map_err(|e| CliError::pipeline(e.to_string()))?;
    let result = session
        .current()
        .ok_or_else(|| CliError::pipeline("no snapshot after regeneration"))?;

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(result)
            .map_err(|e| CliError::pipeline(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::pipeline(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if json_output {
            println!("{json_str}");
        }
    }

    if !json_output {
        let store = InventoryStore::load(&result.records).map_err(CliError::store)?;
        let metrics = store.metrics().map_err(CliError::store)?;
        let fire_sale = store.fire_sale().map_err(CliError::store)?;
        let branch_risk = store.branch_risk().map_err(CliError::store)?;

        print!("{}", render::dashboard(result, &metrics, &fire_sale, &branch_risk));
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "reconciled {} records from {} source(s) — {} units total, {} critical, {} expired",
        s.total_records,
        result
            .records
            .iter()
            .map(|r| r.branch_location.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len(),
        s.total_units,
        s.critical_units,
        s.expired_units,
    );

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::usage(format!("cannot read {}: {e}", config_path.display())))?;

    match PipelineConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' with {} source(s), {} classify rule(s)",
                config.name,
                config.sources.len(),
                config.classify.rules.len(),
            );
            Ok(())
        }
        Err(e) => Err(CliError::invalid_config(e.to_string())),
    }
}
