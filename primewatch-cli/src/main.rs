//! Primewatch CLI
//!
//! Terminal front end for the prime-counting job service: submits a job,
//! follows it until it finishes and renders progress and results.

mod commands;
mod render;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use primewatch_tracker::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when RUST_LOG is unset; covers every primewatch crate
const DEFAULT_LOG_FILTER: &str = "primewatch=warn";

#[derive(Parser)]
#[command(name = "primewatch")]
#[command(about = "Count primes on a remote job service and watch the job finish", long_about = None)]
struct Cli {
    /// Job service URL
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_base_url {
        config = config.with_api_base_url(url);
    }
    config.validate()?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_cli_parses_count_defaults() {
        let cli = Cli::try_parse_from(["primewatch", "count"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Count {
                n: 200_000,
                chunks: 16
            }
        ));
    }
}
