//! Terminal rendering of the client state

use colored::*;
use primewatch_core::domain::job::{JobHandle, JobProgress, JobResult, JobState};
use primewatch_core::dto::health::HealthStatus;
use primewatch_tracker::ClientState;

const BAR_WIDTH: usize = 30;

/// Print the job ID line shown once a job is known
pub fn print_job_id(handle: &JobHandle) {
    println!("{} {}", "Job ID:".bold(), handle.to_string().cyan());
}

/// Print one line for an intermediate state
pub fn print_update(state: &ClientState) {
    match state {
        ClientState::Idle => {}
        ClientState::Submitting { request } => {
            println!(
                "{}",
                format!(
                    "Submitting n={} chunks={}...",
                    format_count(request.n),
                    request.chunks
                )
                .dimmed()
            );
        }
        ClientState::Polling {
            state, progress, ..
        } => match progress {
            Some(progress) => println!("{} {}", badge(state), progress_line(progress)),
            None => println!("{}", badge(state)),
        },
        ClientState::Succeeded { .. } | ClientState::Failed { .. } => print_summary(state),
    }
}

/// Print the full picture of a state: badge, progress, result or error
pub fn print_summary(state: &ClientState) {
    if let Some(tag) = state.state() {
        match state.progress() {
            Some(progress) => println!("{} {}", badge(&tag), progress_line(progress)),
            None => println!("{}", badge(&tag)),
        }
    }

    if let Some(result) = state.result() {
        print_result(result);
    }

    if let Some(error) = state.error() {
        println!();
        println!("{} {}", "❌ Error:".red().bold(), error);
    }
}

fn print_result(result: &JobResult) {
    println!();
    println!("{}", "Results".bold());
    println!(
        "  Prime Count:     {}",
        format_count(result.prime_count).green().bold()
    );
    println!("  Max Number (N):  {}", format_count(result.n));
    println!("  Duration:        {}s", result.duration_sec);
}

/// Print the service health check
pub fn print_health(base_url: &str, health: &HealthStatus) {
    let status = if health.is_ok() {
        health.status.green()
    } else {
        health.status.red()
    };

    println!("{} {}", base_url.cyan(), status);
    if let Some(message) = &health.message {
        println!("  {}", message.dimmed());
    }
    if let Some(docs) = &health.docs {
        println!("  Docs: {}{}", base_url, docs);
    }
}

fn badge(state: &JobState) -> ColoredString {
    let tag = format!("[{}]", state);
    match state {
        JobState::Pending => tag.yellow(),
        JobState::Started | JobState::Progress => tag.cyan(),
        JobState::Success => tag.green().bold(),
        JobState::Failure => tag.red().bold(),
        JobState::Other(_) => tag.dimmed(),
    }
}

fn progress_line(progress: &JobProgress) -> String {
    let pct = progress.percentage();
    format!(
        "{} {:>3}%  Progress: {} / {} chunks",
        progress_bar(pct, BAR_WIDTH),
        pct,
        progress.completed,
        progress.total
    )
}

/// Render a percentage as a fixed-width bar
fn progress_bar(pct: u8, width: usize) -> String {
    let filled = (usize::from(pct.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format an integer with thousands separators
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
