//! Parallel search: workers and their coordinator.
//!
//! This module provides:
//! - Thread-per-core search workers with no shared state on the hot path
//! - A coordinator that owns the aggregate attempt counter and decides
//!   when the search ends
//! - A one-shot stop signal shared by the coordinator, workers and
//!   interrupt handlers

mod coordinator;
mod search;
mod signal;

pub use coordinator::{Coordinator, SearchConfig, SearchOutcome, Tally};
pub use search::{SearchWorker, WorkerState};
pub use signal::StopSignal;

/// Result of a successful vanity address search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityResult {
    /// The private key (64-char lowercase hex, no 0x prefix)
    pub private_key: String,
    /// The Ethereum address (checksummed with 0x prefix)
    pub address: String,
    /// Attempts the finding worker had made when it matched
    pub attempts: u64,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

/// Message sent from a worker to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressReport {
    /// The worker made `count` more attempts without a match.
    Attempts { worker_id: usize, count: u64 },
    /// The worker found a matching keypair and has stopped.
    Found(VanityResult),
    /// The worker used up its own budget and has stopped.
    Exhausted { worker_id: usize },
}
