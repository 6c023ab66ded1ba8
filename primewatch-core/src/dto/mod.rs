//! Data Transfer Objects for the remote job service
//!
//! Request and response bodies that only exist on the wire. Snapshot bodies
//! deserialize straight into [`crate::domain::job::JobSnapshot`].

pub mod health;
pub mod job;
