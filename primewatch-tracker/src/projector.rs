//! State projector
//!
//! Maps one status snapshot onto [`ClientState`]. The `state` tag is the
//! only signal consulted to decide the variant; the presence of `result` or
//! `error` never implies a state on its own.

use primewatch_client::ClientError;
use primewatch_core::domain::job::{JobHandle, JobSnapshot, JobState};

use crate::error::{POLL_CONTEXT, TrackerError};
use crate::state::ClientState;

/// Message used when the service reports a failure without saying why
pub const GENERIC_FAILURE: &str = "Job failed";

/// Projects a snapshot of `handle` onto the client state
///
/// A failure reported by the service comes back as
/// [`TrackerError::JobFailure`]; a success without a result is a
/// [`TrackerError::Protocol`] error.
pub fn project(handle: &JobHandle, snapshot: JobSnapshot) -> Result<ClientState, TrackerError> {
    let JobSnapshot {
        state,
        progress,
        result,
        error,
    } = snapshot;

    match state {
        JobState::Success => {
            let result = result.ok_or_else(|| {
                TrackerError::Protocol("job reported SUCCESS without a result".to_string())
            })?;

            Ok(ClientState::Succeeded {
                handle: handle.clone(),
                progress,
                result,
            })
        }
        JobState::Failure => Err(TrackerError::JobFailure {
            message: error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            progress,
        }),
        state => Ok(ClientState::Polling {
            handle: handle.clone(),
            state,
            progress,
        }),
    }
}

/// Turns the outcome of one status fetch into the state to publish
///
/// Every failure, whether transport, protocol or remote, ends in
/// [`ClientState::Failed`].
pub fn settle(handle: &JobHandle, fetched: Result<JobSnapshot, ClientError>) -> ClientState {
    fetched
        .map_err(TrackerError::from)
        .and_then(|snapshot| project(handle, snapshot))
        .unwrap_or_else(|e| e.to_state(Some(handle.clone()), POLL_CONTEXT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use primewatch_core::domain::job::{JobProgress, JobResult};

    fn handle() -> JobHandle {
        JobHandle::new("abc123")
    }

    fn snapshot(value: serde_json::Value) -> JobSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_running_snapshot_keeps_polling() {
        let state = project(
            &handle(),
            snapshot(serde_json::json!({
                "state": "PROGRESS",
                "progress": { "completed": 4, "total": 16 }
            })),
        )
        .unwrap();

        assert_eq!(
            state,
            ClientState::Polling {
                handle: handle(),
                state: JobState::Progress,
                progress: Some(JobProgress::new(4, 16)),
            }
        );
        assert!(state.is_loading());
        assert_eq!(state.percentage(), 25);
    }

    #[test]
    fn test_success_snapshot() {
        let state = project(
            &handle(),
            snapshot(serde_json::json!({
                "state": "SUCCESS",
                "progress": { "completed": 16, "total": 16 },
                "result": { "prime_count": 17984, "n": 200000, "duration_sec": 2.1 }
            })),
        )
        .unwrap();

        assert!(!state.is_loading());
        assert_eq!(
            state.result(),
            Some(&JobResult {
                prime_count: 17984,
                n: 200_000,
                duration_sec: 2.1,
            })
        );
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_success_without_result_is_protocol_error() {
        let err = project(&handle(), snapshot(serde_json::json!({ "state": "SUCCESS" })))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Protocol(_)));
    }

    #[test]
    fn test_failure_uses_service_message() {
        let err = project(
            &handle(),
            snapshot(serde_json::json!({ "state": "FAILURE", "error": "worker crashed" })),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "worker crashed");
    }

    #[test]
    fn test_failure_without_message_falls_back() {
        let err = project(&handle(), snapshot(serde_json::json!({ "state": "FAILURE" })))
            .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);

        let err = project(
            &handle(),
            snapshot(serde_json::json!({ "state": "FAILURE", "error": "" })),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_state_tag_wins_over_fields() {
        // A stray result on a running job does not make it a success.
        let state = project(
            &handle(),
            snapshot(serde_json::json!({
                "state": "STARTED",
                "result": { "prime_count": 1, "n": 10000, "duration_sec": 0.0 },
                "error": "ignored"
            })),
        )
        .unwrap();

        assert_eq!(state.result(), None);
        assert_eq!(state.error(), None);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_unknown_tag_is_not_terminal() {
        let state = project(&handle(), snapshot(serde_json::json!({ "state": "RETRY" }))).unwrap();
        assert_eq!(state.state(), Some(JobState::Other("RETRY".to_string())));
        assert!(state.is_loading());
    }

    #[test]
    fn test_settle_prefixes_poll_errors() {
        let state = settle(&handle(), Err(ClientError::rejection(500, "backend unavailable")));

        assert_eq!(state.job_handle(), Some(&handle()));
        assert_eq!(
            state.error(),
            Some("Failed to get job status: backend unavailable")
        );
    }
}
