//! Observable client state
//!
//! One tagged value replaces the loose set of fields a UI would otherwise
//! hold (job id, state, progress, result, error, loading). Each variant only
//! carries the fields that are meaningful in it, so a terminal state always
//! has exactly one of result or error and a running state has neither.

use primewatch_core::domain::job::{JobHandle, JobProgress, JobRequest, JobResult, JobState};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClientState {
    /// Nothing submitted yet, or tracking was abandoned
    #[default]
    Idle,

    /// A request is on its way to the service; no handle exists yet
    Submitting { request: JobRequest },

    /// The job is known to the service and is being polled
    Polling {
        handle: JobHandle,
        state: JobState,
        progress: Option<JobProgress>,
    },

    /// The service reported success
    Succeeded {
        handle: JobHandle,
        progress: Option<JobProgress>,
        result: JobResult,
    },

    /// Submission failed, polling failed, or the job failed remotely
    ///
    /// `handle` is absent when the failure happened before the service
    /// assigned one. `reported` is set only when the service itself said
    /// the job failed; a poll that could not complete leaves it unset.
    Failed {
        handle: Option<JobHandle>,
        progress: Option<JobProgress>,
        error: String,
        reported: bool,
    },
}

impl ClientState {
    /// True while a submission or a poll cycle is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ClientState::Submitting { .. } | ClientState::Polling { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClientState::Succeeded { .. } | ClientState::Failed { .. }
        )
    }

    pub fn job_handle(&self) -> Option<&JobHandle> {
        match self {
            ClientState::Polling { handle, .. } | ClientState::Succeeded { handle, .. } => {
                Some(handle)
            }
            ClientState::Failed { handle, .. } => handle.as_ref(),
            ClientState::Idle | ClientState::Submitting { .. } => None,
        }
    }

    /// The last state tag reported by the service, if any
    ///
    /// Only a failure the service reported carries the FAILURE tag; a
    /// failed submission or poll has no tag.
    pub fn state(&self) -> Option<JobState> {
        match self {
            ClientState::Polling { state, .. } => Some(state.clone()),
            ClientState::Succeeded { .. } => Some(JobState::Success),
            ClientState::Failed { reported: true, .. } => Some(JobState::Failure),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<&JobProgress> {
        match self {
            ClientState::Polling { progress, .. }
            | ClientState::Succeeded { progress, .. }
            | ClientState::Failed { progress, .. } => progress.as_ref(),
            ClientState::Idle | ClientState::Submitting { .. } => None,
        }
    }

    pub fn result(&self) -> Option<&JobResult> {
        match self {
            ClientState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ClientState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Progress as a whole percentage; 0 when no progress is known
    pub fn percentage(&self) -> u8 {
        self.progress().map_or(0, JobProgress::percentage)
    }
}
