pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pairalign",
    version,
    about = "Optimal pairwise global sequence alignment",
    long_about = "Pairalign computes an optimal global alignment of two sequences under a \
                  linear gap scoring scheme, either with the full Needleman-Wunsch matrix or \
                  with Hirschberg's linear-space divide and conquer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = config value, then all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two sequences
    Align(commands::align::AlignArgs),

    /// Create or inspect configuration files
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    pub verbose: u8,
    pub threads: usize,
}

impl GlobalOptions {
    /// Thread count to use: the command line first, then `configured`, then
    /// every available core.
    pub fn resolve_threads(&self, configured: usize) -> usize {
        match (self.threads, configured) {
            (0, 0) => num_cpus::get(),
            (0, n) => n,
            (n, _) => n,
        }
    }
}

/// Size the global rayon pool. Only the first call in a process takes effect.
pub fn init_thread_pool(num_threads: usize, verbose: u8) {
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        debug!("Thread pool already initialized: {}", e);
        return;
    }

    if verbose > 0 {
        eprintln!("Using {} threads", num_threads);
    }
}
