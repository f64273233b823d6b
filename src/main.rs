use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    match cli.command {
        Commands::Generate(args) => commands::generate(&args),
        Commands::Validate(args) => commands::validate(&args),
    }
}
