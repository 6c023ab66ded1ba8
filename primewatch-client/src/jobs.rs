//! Job-related API endpoints

use crate::JobServiceClient;
use crate::error::Result;
use primewatch_core::domain::job::{JobHandle, JobRequest, JobSnapshot};
use primewatch_core::dto::health::HealthStatus;
use primewatch_core::dto::job::CreateJobResponse;
use tracing::debug;

impl JobServiceClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a prime-counting job
    ///
    /// The request is sent as-is; bounds checking is left to the caller and
    /// to the service, which rejects out-of-range values with a 422.
    ///
    /// # Returns
    /// The handle the service assigned to the queued job
    pub async fn submit_job(&self, req: &JobRequest) -> Result<JobHandle> {
        let url = self.endpoint(&["api", "count-primes"])?;
        debug!("POST {} n={} chunks={}", url, req.n, req.chunks);

        let response = self.client.post(url).json(req).send().await?;
        let created: CreateJobResponse = self.handle_response(response).await?;

        Ok(created.job_id)
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `handle` - The handle returned by [`JobServiceClient::submit_job`]
    pub async fn get_job_status(&self, handle: &JobHandle) -> Result<JobSnapshot> {
        let url = self.endpoint(&["api", "jobs", handle.as_str()])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Service
    // =============================================================================

    /// Check that the service is up
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&[""])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
