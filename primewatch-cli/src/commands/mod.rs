//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use primewatch_tracker::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a prime-counting job and follow it until it finishes
    Count {
        /// Count primes up to N (must be at least 10,000)
        #[arg(short, long, default_value_t = 200_000)]
        n: u64,

        /// Number of chunks the range is split into (1-128)
        #[arg(short, long, default_value_t = 16)]
        chunks: u32,
    },
    /// Follow an already submitted job until it finishes
    Watch {
        /// Job ID returned at submission
        job_id: String,
    },
    /// Show the current status of a job once
    Status {
        /// Job ID returned at submission
        job_id: String,
    },
    /// Check that the job service is up
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler. The exit code is non-zero
/// when the job (or the request for it) failed.
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::Count { n, chunks } => job::count(config, n, chunks).await,
        Commands::Watch { job_id } => job::watch(config, job_id).await,
        Commands::Status { job_id } => job::status(config, job_id).await,
        Commands::Health => job::health(config).await,
    }
}
