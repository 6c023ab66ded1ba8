//! Job tracker
//!
//! Owns the client state and the poller. At most one job is tracked at a
//! time: submitting again, tracking another handle, resetting, or dropping
//! the tracker stops the current poller before anything else changes.

use std::sync::Arc;

use primewatch_client::{JobService, JobServiceClient};
use primewatch_core::domain::job::{JobHandle, JobRequest, JobState};
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{SUBMIT_CONTEXT, TrackerError};
use crate::poller::PollTask;
use crate::state::ClientState;

/// Tracks one prime-counting job from submission to a terminal state
pub struct JobTracker<S: ?Sized> {
    service: Arc<S>,
    poll_interval: Duration,
    state: Arc<watch::Sender<ClientState>>,
    poller: Option<PollTask>,
}

impl JobTracker<JobServiceClient> {
    /// Creates a tracker talking HTTP to the service named in `config`
    ///
    /// Fails if `config` does not validate.
    pub fn connect(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let client = JobServiceClient::with_timeout(&config.api_base_url, config.request_timeout)?;
        Ok(Self::new(Arc::new(client), config.poll_interval))
    }
}

impl<S> JobTracker<S>
where
    S: JobService + ?Sized + 'static,
{
    pub fn new(service: Arc<S>, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(ClientState::Idle);
        Self {
            service,
            poll_interval,
            state: Arc::new(state),
            poller: None,
        }
    }

    /// A receiver that sees every state the tracker publishes
    pub fn subscribe(&self) -> watch::Receiver<ClientState> {
        self.state.subscribe()
    }

    /// The current state
    pub fn state(&self) -> ClientState {
        self.state.borrow().clone()
    }

    /// Whether the poll timer is armed
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollTask::is_armed)
    }

    /// Submits a job and starts polling it
    ///
    /// Any job tracked so far is abandoned first: its poller is stopped
    /// before the state is reset to `Submitting`. The remote job is not
    /// cancelled. On failure the error is also published as
    /// [`ClientState::Failed`] and no handle is kept.
    ///
    /// Dropping the returned future before it completes publishes
    /// [`TrackerError::Cancelled`] as the failed state. A job the service
    /// may have created in the meantime is not tracked.
    pub async fn submit(&mut self, request: JobRequest) -> Result<JobHandle, TrackerError> {
        self.stop_polling();
        self.state.send_replace(ClientState::Submitting { request });
        let _pending = PendingSubmission(Arc::clone(&self.state));

        if let Err(e) = request.validate() {
            return Err(self.fail_submission(e.into()));
        }

        info!(
            "Submitting job n={} chunks={}",
            request.n, request.chunks
        );

        match self.service.submit(&request).await {
            Ok(handle) => {
                info!("Job submitted with ID: {}", handle);
                self.start_polling(handle.clone());
                Ok(handle)
            }
            Err(e) => Err(self.fail_submission(e.into())),
        }
    }

    /// Starts polling a job that was submitted elsewhere
    ///
    /// Abandons the current job the same way [`JobTracker::submit`] does.
    pub fn track(&mut self, handle: JobHandle) {
        self.stop_polling();
        info!("Tracking job {}", handle);
        self.start_polling(handle);
    }

    /// Stops polling and forgets the current job
    pub fn reset(&mut self) {
        self.stop_polling();
        self.state.send_replace(ClientState::Idle);
    }

    fn start_polling(&mut self, handle: JobHandle) {
        self.state.send_replace(ClientState::Polling {
            handle: handle.clone(),
            state: JobState::Pending,
            progress: None,
        });

        self.poller = Some(PollTask::spawn(
            Arc::clone(&self.service),
            handle,
            self.poll_interval,
            Arc::clone(&self.state),
        ));
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            if poller.is_armed() {
                info!("Abandoning job {}", poller.job());
            }
            poller.stop();
        }
    }

    fn fail_submission(&self, err: TrackerError) -> TrackerError {
        debug!("{}: {}", SUBMIT_CONTEXT, err);
        self.state.send_replace(err.to_state(None, SUBMIT_CONTEXT));
        err
    }
}

/// Fails a submission that is dropped while still in flight
struct PendingSubmission(Arc<watch::Sender<ClientState>>);

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        self.0.send_if_modified(|current| {
            if !matches!(current, ClientState::Submitting { .. }) {
                return false;
            }

            debug!("Submission dropped before the service answered");
            *current = TrackerError::Cancelled.to_state(None, SUBMIT_CONTEXT);
            true
        });
    }
}
