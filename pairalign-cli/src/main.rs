use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands, GlobalOptions};
use pairalign_core::PairAlignError;

fn main() {
    // RUST_LOG wins, then PAIRALIGN_LOG, then warn
    let log_level = std::env::var("PAIRALIGN_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = e
            .downcast_ref::<PairAlignError>()
            .map(PairAlignError::exit_code)
            .unwrap_or(1);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = GlobalOptions {
        verbose: cli.verbose,
        threads: cli.threads,
    };

    match cli.command {
        Commands::Align(args) => crate::cli::commands::align::run(args, &options),
        Commands::Config { command } => crate::cli::commands::config::run(command),
    }
}
