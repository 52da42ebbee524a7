//! Cryptographic operations for Ethereum key and address generation.
//!
//! This module provides:
//! - Random secp256k1 key generation with rejection of invalid scalars
//! - Ethereum address derivation using Keccak-256
//! - Mixed-case checksum encoding

mod address;
pub mod checksum;
mod keypair;

pub use address::Address;
pub use keypair::{KeyError, Keypair};
