//! Core domain types
//!
//! These types describe a single prime-counting job as seen from the client:
//! the request that starts it, the handle that identifies it, and the
//! snapshots the service reports while it runs.

pub mod job;
