use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Generate trial sequences for single-task, task-switching and PRP blocks.
#[derive(Parser, Debug)]
#[command(name = "cotask", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Level directive for the `-v` count; `COTASK_LOG` takes precedence.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Sends logs to stderr so generated JSON on stdout stays clean.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_env("COTASK_LOG")
            .unwrap_or_else(|_| EnvFilter::new(self.log_directive()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.verbose >= 2)
            .with_writer(std::io::stderr);

        let _ = match self.log_format {
            LogFormat::Human => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate trials for every block in a config file.
    Generate(GenerateArgs),

    /// Load and validate a config file without generating.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Block config JSON (one object or an array of blocks).
    #[arg(short, long, env = "COTASK_CONFIG")]
    pub config: PathBuf,

    /// Trials per block.
    #[arg(short = 'n', long, default_value_t = 64)]
    pub trials: usize,

    /// Seed for reproducible output; fresh OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Block config JSON (one object or an array of blocks).
    #[arg(short, long, env = "COTASK_CONFIG")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Human,
    /// Newline-delimited JSON
    Json,
}
