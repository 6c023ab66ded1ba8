//! Primewatch HTTP Client
//!
//! A small, type-safe HTTP client for the remote prime-counting job service.
//!
//! The client only moves bodies on and off the wire. Tracking a job to
//! completion is the tracker crate's concern; it talks to the service
//! through the [`JobService`] trait so it can be driven by a fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use primewatch_client::JobServiceClient;
//! use primewatch_core::domain::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JobServiceClient::new("http://localhost:8000");
//!
//!     let handle = client.submit_job(&JobRequest::new(200_000, 16)).await?;
//!     let snapshot = client.get_job_status(&handle).await?;
//!
//!     println!("Job {} is {}", handle, snapshot.state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod service;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use service::JobService;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use primewatch_core::dto::job::ErrorBody;

/// HTTP client for the prime-counting job service
#[derive(Debug, Clone)]
pub struct JobServiceClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobServiceClient {
    /// Create a new client with reqwest's default settings
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the job service (e.g., "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for an endpoint below the base URL
    ///
    /// Each segment is percent-encoded on its own, so a job id containing
    /// `/` or `?` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become [`ClientError::RemoteRejection`] carrying the
    /// service's `detail`. A body that cannot be read is a transport failure;
    /// one that cannot be decoded is a protocol failure.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ClientError::rejection(status.as_u16(), message));
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| ClientError::Protocol(e.to_string()))
    }
}
