// RenoPlan CLI - headless renovation estimates
// Every command prints JSON with --json, a human summary otherwise.

mod estimate;
mod exit_codes;
mod finance;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use renoplan_engine::EngineConfig;

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "renoplan")]
#[command(about = "Renovation cost, ROI, payment and timeline estimates")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Engine config (TOML). Defaults apply when omitted.
    #[arg(long, global = true, env = "RENOPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Log calculation detail
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full estimate for a project file: breakdown, confidence, timeline, payments
    #[command(after_help = "\
Examples:
  renoplan estimate kitchen.toml
  renoplan estimate kitchen.toml --json
  renoplan estimate kitchen.toml --output estimate.json")]
    Estimate {
        /// Project file with [project] and [costs] tables
        project: PathBuf,

        /// Print JSON to stdout instead of a summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Investment return analysis with what-if scenarios
    #[command(after_help = "\
Examples:
  renoplan roi --purchase 500000 --rehab 75000 --arv 650000
  renoplan roi --purchase 500000 --rehab 75000 --arv 650000 --closing 25000 --json
  renoplan roi --purchase 500000 --rehab 75000 --arv 650000 --target-roi 20")]
    Roi {
        #[arg(long)]
        purchase: f64,

        #[arg(long)]
        rehab: f64,

        /// After-repair value
        #[arg(long)]
        arv: f64,

        /// Closing costs (default: share of purchase price)
        #[arg(long)]
        closing: Option<f64>,

        /// Carrying costs (default: share of purchase price)
        #[arg(long)]
        carrying: Option<f64>,

        /// Also report the highest purchase price reaching this ROI percent
        #[arg(long)]
        target_roi: Option<f64>,

        #[arg(long)]
        json: bool,
    },

    /// Milestone payment schedule between two dates
    #[command(after_help = "\
Examples:
  renoplan schedule --cost 30000 --start 2025-01-01 --end 2025-03-01
  renoplan schedule --cost 30000 --start 2025-01-01 --end 2025-03-01 --mark materials=paid --json")]
    Schedule {
        /// Total project cost
        #[arg(long)]
        cost: f64,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Apply a status change, e.g. progress=due. Repeatable, applied in order.
        #[arg(long, value_name = "ID=STATUS")]
        mark: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Construction phases for a project type
    #[command(after_help = "\
Examples:
  renoplan timeline 'bathroom remodel'
  renoplan timeline kitchen --quality premium --json")]
    Timeline {
        /// Free-form project type, e.g. "master bathroom"
        project_type: String,

        /// Quality tier: budget, standard, mid-range, premium, luxury
        #[arg(long, default_value = "standard")]
        quality: String,

        #[arg(long)]
        json: bool,
    },

    /// Engine config utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate an engine config without running anything
    Validate {
        /// Path to the config TOML
        path: PathBuf,
    },

    /// Print the default config as TOML
    Defaults,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RENOPLAN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so --json output stays clean.
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: cannot initialize logging: {e}");
    }
}

/// Load the engine config, or defaults when no path was given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    let config = EngineConfig::from_toml(&text)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, format!("{}: {e}", path.display())))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Serialize to pretty JSON, optionally writing it to a file as well.
pub fn emit_json<T: serde::Serialize>(
    value: &T,
    print: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        CliError::new(exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}"))
    })?;
    if let Some(path) = output {
        std::fs::write(path, &json)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }
    if print {
        println!("{json}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        None => {
            eprintln!("Usage: renoplan <command> [options]");
            eprintln!("       renoplan --help for more information");
            Ok(())
        }
        Some(Commands::Estimate { project, json, output }) => {
            estimate::cmd_estimate(&project, config_path, json, output.as_deref())
        }
        Some(Commands::Roi { purchase, rehab, arv, closing, carrying, target_roi, json }) => {
            let inputs = renoplan_engine::roi::RoiInputs {
                purchase_price: purchase,
                rehab_budget: rehab,
                after_repair_value: arv,
                closing_costs: closing,
                carrying_costs: carrying,
            };
            finance::cmd_roi(inputs, target_roi, config_path, json)
        }
        Some(Commands::Schedule { cost, start, end, mark, json }) => {
            finance::cmd_schedule(cost, &start, &end, &mark, config_path, json)
        }
        Some(Commands::Timeline { project_type, quality, json }) => {
            estimate::cmd_timeline(&project_type, &quality, json)
        }
        Some(Commands::Config(ConfigCommands::Validate { path })) => {
            estimate::cmd_config_validate(&path)
        }
        Some(Commands::Config(ConfigCommands::Defaults)) => estimate::cmd_config_defaults(),
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
