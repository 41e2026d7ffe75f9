// satcat CLI - satellite catalog ingest and reconciliation

mod exit_codes;
mod inspect;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "satcat")]
#[command(about = "Normalize and reconcile public satellite catalogs into SQLite")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load both catalogs, reconcile them and write the three tables
    #[command(after_help = "\
Examples:
  satcat run
  satcat run --config satcat.toml --json
  satcat run --registry UCS_Satellite_Database.txt --catalog satcat.txt --db satcat.db")]
    Run {
        /// Config file (default: <config_dir>/satcat/config.toml if present)
        #[arg(long, env = "SATCAT_CONFIG")]
        config: Option<PathBuf>,

        /// Registry export: path or http(s) URL
        #[arg(long)]
        registry: Option<String>,

        /// Tracking catalog: path or http(s) URL
        #[arg(long)]
        catalog: Option<String>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Print the run report as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Check a config file without running
    #[command(after_help = "\
Examples:
  satcat validate satcat.toml")]
    Validate {
        config: PathBuf,
    },

    /// Parse one fixed-width tracking catalog line and print its fields as JSON
    #[command(after_help = "\
Examples:
  satcat parse-line \"$(head -1 satcat.txt)\"")]
    ParseLine {
        #[arg(allow_hyphen_values = true)]
        line: String,
    },

    /// Show how raw values are typed
    #[command(after_help = "\
Examples:
  satcat coerce 1,234 '  42  ' 11/20/98 N/A")]
    Coerce {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,

        /// Print JSON instead of one tab-separated line per value
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Logs go to stderr so `--json` output stays clean. `log` records from the
/// library crates are bridged into the subscriber.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            registry,
            catalog,
            db,
            json,
        } => run::cmd_run(run::RunArgs {
            config,
            registry,
            catalog,
            db,
            json,
        }),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::ParseLine { line } => inspect::cmd_parse_line(&line),
        Commands::Coerce { values, json } => inspect::cmd_coerce(&values, json),
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
