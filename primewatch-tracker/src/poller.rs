//! Job poller
//!
//! Fetches the status of one job once per period until the job reaches a
//! terminal state or the poller is stopped. Polls are serialized: the next
//! tick is not taken until the previous fetch has finished, and ticks missed
//! while a slow fetch was outstanding are delayed rather than replayed.

use std::sync::Arc;

use primewatch_client::JobService;
use primewatch_core::domain::job::JobHandle;
use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use crate::projector::settle;
use crate::state::ClientState;

/// Shortest period the timer accepts; shorter ones are raised to it
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A running poll loop for a single job
///
/// Dropping the task cancels it. An in-flight fetch is abandoned at its next
/// await point and its response is never published.
pub struct PollTask {
    job: JobHandle,
    token: CancellationToken,
    _guard: DropGuard,
}

impl PollTask {
    /// Spawns the poll loop for `job`
    ///
    /// The first fetch fires immediately; later ones follow every `period`,
    /// which is raised to [`MIN_PERIOD`] if shorter.
    pub fn spawn<S>(
        service: Arc<S>,
        job: JobHandle,
        period: Duration,
        state: Arc<watch::Sender<ClientState>>,
    ) -> Self
    where
        S: JobService + ?Sized + 'static,
    {
        let token = CancellationToken::new();
        let period = period.max(MIN_PERIOD);

        tokio::spawn(run(service, job.clone(), period, state, token.clone()));

        Self {
            job,
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    /// The job this task polls
    pub fn job(&self) -> &JobHandle {
        &self.job
    }

    /// Whether the timer is still armed
    pub fn is_armed(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Stops the timer; later calls are no-ops
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            debug!("Stopping poller for job {}", self.job);
            self.token.cancel();
        }
    }
}

async fn run<S>(
    service: Arc<S>,
    job: JobHandle,
    period: Duration,
    state: Arc<watch::Sender<ClientState>>,
    token: CancellationToken,
) where
    S: JobService + ?Sized,
{
    info!("Polling job {} every {:?}", job, period);

    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        debug!("Fetching status of job {}", job);

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            fetched = service.status(&job) => fetched,
        };

        if !publish(&state, &job, &token, settle(&job, fetched)) {
            break;
        }
    }

    debug!("Poller for job {} exited", job);
}

/// Publishes `next` if `job` is still the one being tracked
///
/// Returns whether polling should continue. A terminal state cancels
/// `token` before it becomes visible, so observers that see it also see
/// the timer disarmed. A response for a job that is no longer active, or
/// from a task that was already stopped, is discarded.
pub fn publish(
    state: &watch::Sender<ClientState>,
    job: &JobHandle,
    token: &CancellationToken,
    next: ClientState,
) -> bool {
    let mut terminal = false;

    let accepted = state.send_if_modified(|current| {
        let active = matches!(current, ClientState::Polling { handle, .. } if handle == job);
        if token.is_cancelled() || !active {
            return false;
        }

        terminal = next.is_terminal();
        if terminal {
            token.cancel();
            match &next {
                ClientState::Failed { error, .. } => debug!("Job {} failed: {}", job, error),
                _ => info!("Job {} succeeded", job),
            }
        } else if let Some(progress) = next.progress() {
            debug!(
                "Job {} progress {}/{}",
                job, progress.completed, progress.total
            );
        }

        *current = next;
        true
    });

    if !accepted {
        warn!("Discarding stale status response for job {}", job);
    }

    accepted && !terminal
}
