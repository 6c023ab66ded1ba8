//! Error types for the job lifecycle client

use primewatch_client::ClientError;
use primewatch_core::domain::job::{JobHandle, JobProgress, ValidationError};
use thiserror::Error;

use crate::state::ClientState;

/// Prefix for errors raised while submitting a job
pub const SUBMIT_CONTEXT: &str = "Failed to submit job";

/// Prefix for errors raised while polling a job
pub const POLL_CONTEXT: &str = "Failed to get job status";

/// Every way a submission or a poll can end in failure
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request was rejected locally, before any I/O
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The network call could not complete
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("{message}")]
    RemoteRejection { status: u16, message: String },

    /// The response body was unparsable or missing required fields
    #[error("{0}")]
    Protocol(String),

    /// The caller dropped a submission before the service answered
    #[error("submission was cancelled")]
    Cancelled,

    /// The service reported the job itself as failed
    #[error("{message}")]
    JobFailure {
        message: String,
        progress: Option<JobProgress>,
    },
}

impl TrackerError {
    /// The message shown to the user for this error
    ///
    /// A job failure is shown exactly as the service reported it; everything
    /// else is prefixed with `context`.
    pub fn describe(&self, context: &str) -> String {
        match self {
            TrackerError::JobFailure { message, .. } => message.clone(),
            other => format!("{}: {}", context, other),
        }
    }

    /// The failed state this error leaves the client in
    pub fn to_state(&self, handle: Option<JobHandle>, context: &str) -> ClientState {
        let (progress, reported) = match self {
            TrackerError::JobFailure { progress, .. } => (*progress, true),
            _ => (None, false),
        };

        ClientState::Failed {
            handle,
            progress,
            error: self.describe(context),
            reported,
        }
    }
}

impl From<ClientError> for TrackerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(e) => TrackerError::Transport(error_chain(&e)),
            ClientError::RemoteRejection { status, message } => {
                TrackerError::RemoteRejection { status, message }
            }
            ClientError::Protocol(message) => TrackerError::Protocol(message),
            err @ ClientError::InvalidUrl(_) => TrackerError::Transport(err.to_string()),
        }
    }
}

/// Joins an error and its sources, so "error sending request" carries the
/// underlying "Connection refused" along with it.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

#[cfg(test)]
mod tests {
    use primewatch_core::domain::job::JobState;

    use super::*;

    #[test]
    fn test_job_failure_is_shown_verbatim() {
        let err = TrackerError::JobFailure {
            message: "worker crashed".to_string(),
            progress: Some(JobProgress::new(3, 16)),
        };

        assert_eq!(err.describe(POLL_CONTEXT), "worker crashed");

        let state = err.to_state(Some(JobHandle::new("abc123")), POLL_CONTEXT);
        assert_eq!(state.error(), Some("worker crashed"));
        assert_eq!(state.progress(), Some(&JobProgress::new(3, 16)));
        assert_eq!(state.state(), Some(JobState::Failure));
    }

    #[test]
    fn test_failed_poll_is_not_a_reported_failure() {
        let err = TrackerError::from(ClientError::rejection(404, "Job not found"));
        let state = err.to_state(Some(JobHandle::new("abc123")), POLL_CONTEXT);

        assert_eq!(state.job_handle(), Some(&JobHandle::new("abc123")));
        assert_eq!(state.error(), Some("Failed to get job status: Job not found"));
        assert_eq!(state.state(), None);
    }

    #[test]
    fn test_other_errors_are_prefixed() {
        let err = TrackerError::from(ClientError::rejection(500, "broker down"));
        assert_eq!(
            err.describe(SUBMIT_CONTEXT),
            "Failed to submit job: broker down"
        );

        let err = TrackerError::from(ValidationError::ChunksOutOfRange { chunks: 0 });
        let state = err.to_state(None, SUBMIT_CONTEXT);
        assert_eq!(state.job_handle(), None);
        assert_eq!(
            state.error(),
            Some("Failed to submit job: chunks must be between 1 and 128 (got 0)")
        );
    }

    #[test]
    fn test_error_chain_appends_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");

        assert_eq!(
            error_chain(&Wrapped(inner)),
            "error sending request: Connection refused"
        );
    }

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }
}
