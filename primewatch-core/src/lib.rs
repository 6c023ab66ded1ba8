//! Primewatch Core
//!
//! Core types shared by the prime-counting job client.
//!
//! This crate contains:
//! - Domain types: jobs, their states, progress and results
//! - DTOs: wire bodies exchanged with the remote job service

pub mod domain;
pub mod dto;
