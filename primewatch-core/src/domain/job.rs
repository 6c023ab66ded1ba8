//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest upper bound the service accepts
pub const MIN_N: u64 = 10_000;

/// Smallest number of chunks a job can be split into
pub const MIN_CHUNKS: u32 = 1;

/// Largest number of chunks a job can be split into
pub const MAX_CHUNKS: u32 = 128;

/// Request to count primes up to `n`, split into `chunks` units of work
///
/// Serializes to the `POST /api/count-primes` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub n: u64,
    pub chunks: u32,
}

impl JobRequest {
    pub fn new(n: u64, chunks: u32) -> Self {
        Self { n, chunks }
    }

    /// Checks the request against the bounds the service enforces
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.n < MIN_N {
            return Err(ValidationError::NTooSmall { n: self.n });
        }

        if !(MIN_CHUNKS..=MAX_CHUNKS).contains(&self.chunks) {
            return Err(ValidationError::ChunksOutOfRange {
                chunks: self.chunks,
            });
        }

        Ok(())
    }
}

impl Default for JobRequest {
    fn default() -> Self {
        Self {
            n: 200_000,
            chunks: 16,
        }
    }
}

/// A request that failed local validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("n must be at least 10,000 (got {n})")]
    NTooSmall { n: u64 },

    #[error("chunks must be between 1 and 128 (got {chunks})")]
    ChunksOutOfRange { chunks: u32 },
}

/// Opaque identifier the service assigns to a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JobHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// State tag reported by the service
///
/// Only `Success` and `Failure` are terminal. Tags the client does not
/// recognize are kept verbatim in `Other` and treated as still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    Pending,
    Started,
    Progress,
    Success,
    Failure,
    Other(String),
}

impl JobState {
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Pending => "PENDING",
            JobState::Started => "STARTED",
            JobState::Progress => "PROGRESS",
            JobState::Success => "SUCCESS",
            JobState::Failure => "FAILURE",
            JobState::Other(tag) => tag,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

impl From<String> for JobState {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "PENDING" => JobState::Pending,
            "STARTED" => JobState::Started,
            "PROGRESS" => JobState::Progress,
            "SUCCESS" => JobState::Success,
            "FAILURE" => JobState::Failure,
            _ => JobState::Other(tag),
        }
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chunk-level progress of a running job
///
/// `completed <= total` is the service's invariant and is not re-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProgress {
    pub completed: u32,
    pub total: u32,
}

impl JobProgress {
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Completion as a whole percentage in `0..=100`
    ///
    /// Rounds half up. A zero total yields 0.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }

        let completed = u64::from(self.completed);
        let total = u64::from(self.total);
        let pct = (completed * 200 + total) / (total * 2);
        pct.min(100) as u8
    }
}

/// Final outcome of a successful job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub prime_count: u64,
    pub n: u64,
    pub duration_sec: f64,
}

/// Full status of a job as of one poll
///
/// Deserializes from the `GET /api/jobs/{job_id}` body. Which of `result`
/// and `error` is meaningful is decided by `state` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub state: JobState,
    #[serde(default)]
    pub progress: Option<JobProgress>,
    #[serde(default)]
    pub result: Option<JobResult>,
    #[serde(default)]
    pub error: Option<String>,
}
