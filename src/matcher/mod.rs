//! Pattern matching for Ethereum addresses.
//!
//! A search pattern fixes the leading and/or trailing hex characters of the
//! address, either case-insensitively or against the checksum casing.

mod pattern;

pub use pattern::{SearchPattern, ADDRESS_HEX_LEN};
