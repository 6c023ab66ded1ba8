//! Primewatch Tracker
//!
//! The job lifecycle client: submits a prime-counting job, polls it at a
//! fixed interval until the service reports a terminal state, and exposes
//! the outcome as a single observable [`ClientState`].
//!
//! Architecture:
//! - Submitter: validates and sends the request, obtains a job handle
//! - Poller: a cancellable task that fetches status once per period
//! - State Projector: maps each snapshot onto [`ClientState`]
//!
//! ```no_run
//! use primewatch_core::domain::job::JobRequest;
//! use primewatch_tracker::{Config, JobTracker};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let mut tracker = JobTracker::connect(&config)?;
//! let mut updates = tracker.subscribe();
//!
//! tracker.submit(JobRequest::new(200_000, 16)).await?;
//! let last = updates.wait_for(|s| s.is_terminal()).await?.clone();
//! println!("{:?}", last);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod poller;
pub mod projector;
pub mod state;
mod tracker;

pub use config::Config;
pub use error::TrackerError;
pub use projector::{project, settle};
pub use state::ClientState;
pub use tracker::JobTracker;
