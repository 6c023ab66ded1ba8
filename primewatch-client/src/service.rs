//! Service seam
//!
//! The tracker depends on this trait rather than on [`JobServiceClient`]
//! directly, so its state machine can be exercised against a scripted
//! in-memory service.

use async_trait::async_trait;
use primewatch_core::domain::job::{JobHandle, JobRequest, JobSnapshot};

use crate::JobServiceClient;
use crate::error::Result;

/// Operations the job lifecycle client needs from the remote service
#[async_trait]
pub trait JobService: Send + Sync {
    /// Queues a job and returns its handle
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle>;

    /// Fetches the current snapshot of a job
    async fn status(&self, handle: &JobHandle) -> Result<JobSnapshot>;
}

#[async_trait]
impl JobService for JobServiceClient {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle> {
        self.submit_job(request).await
    }

    async fn status(&self, handle: &JobHandle) -> Result<JobSnapshot> {
        self.get_job_status(handle).await
    }
}
