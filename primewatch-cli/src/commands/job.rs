//! Job command handlers
//!
//! Binds the tracker's observable state to the terminal: every state the
//! tracker publishes is rendered until a terminal one arrives.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::*;
use primewatch_client::{JobService, JobServiceClient};
use primewatch_core::domain::job::{JobHandle, JobRequest};
use primewatch_tracker::{ClientState, Config, JobTracker, settle};
use tokio::sync::watch;

use crate::render;

/// Submit a job and follow it
pub async fn count(config: &Config, n: u64, chunks: u32) -> Result<ExitCode> {
    let mut tracker = JobTracker::connect(config)?;
    let updates = tracker.subscribe();

    let handle = match tracker.submit(JobRequest::new(n, chunks)).await {
        Ok(handle) => handle,
        Err(_) => {
            render::print_summary(&tracker.state());
            return Ok(ExitCode::FAILURE);
        }
    };

    render::print_job_id(&handle);
    follow(updates).await
}

/// Follow a job submitted earlier
pub async fn watch(config: &Config, job_id: String) -> Result<ExitCode> {
    let mut tracker = JobTracker::connect(config)?;
    let updates = tracker.subscribe();

    let handle = JobHandle::new(job_id);
    render::print_job_id(&handle);
    tracker.track(handle);

    follow(updates).await
}

/// Fetch and show a single snapshot
pub async fn status(config: &Config, job_id: String) -> Result<ExitCode> {
    let client = JobServiceClient::with_timeout(&config.api_base_url, config.request_timeout)?;
    let handle = JobHandle::new(job_id);

    let state = settle(&handle, client.status(&handle).await);

    render::print_job_id(&handle);
    render::print_summary(&state);

    Ok(exit_code(&state))
}

/// Check the service health endpoint
pub async fn health(config: &Config) -> Result<ExitCode> {
    let client = JobServiceClient::with_timeout(&config.api_base_url, config.request_timeout)?;

    let health = client
        .health()
        .await
        .with_context(|| format!("Job service at {} is unreachable", config.api_base_url))?;

    render::print_health(client.base_url(), &health);

    Ok(if health.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Render every published state until the job is terminal or the user
/// interrupts
///
/// The caller's tracker stays alive for the whole loop and stops polling
/// when it is dropped on return.
async fn follow(mut updates: watch::Receiver<ClientState>) -> Result<ExitCode> {
    loop {
        let state = updates.borrow_and_update().clone();
        render::print_update(&state);

        if state.is_terminal() {
            return Ok(exit_code(&state));
        }

        tokio::select! {
            changed = updates.changed() => {
                changed.context("Tracker stopped publishing updates")?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!(
                    "{}",
                    "Stopped watching; the job keeps running on the service.".yellow()
                );
                return Ok(ExitCode::from(130));
            }
        }
    }
}

fn exit_code(state: &ClientState) -> ExitCode {
    if state.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
