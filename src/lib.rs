//! # vanity_search
//!
//! Parallel Ethereum vanity address search.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation, address derivation and checksum encoding
//! - `matcher`: Prefix/suffix matching, optionally checksum-exact
//! - `worker`: Search workers and the coordinator that stops them
//! - `config`: Runtime configuration
//! - `output`: Result persistence

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod output;
pub mod worker;

pub use config::{Config, ConfigError};
pub use crypto::{Address, KeyError, Keypair};
pub use matcher::SearchPattern;
pub use worker::{
    Coordinator, ProgressReport, SearchConfig, SearchOutcome, SearchWorker, StopSignal,
    VanityResult, WorkerState,
};
