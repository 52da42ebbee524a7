//! Prefix/suffix pattern matching.

use crate::crypto::checksum::{check_char, keccak_digest};
use crate::crypto::Address;

/// Number of hex characters in an address (20 bytes).
pub const ADDRESS_HEX_LEN: usize = 40;

/// The leading and trailing characters a vanity address must carry.
///
/// Immutable once built; workers share it read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPattern {
    /// Required leading hex characters
    prefix: String,
    /// Required trailing hex characters
    suffix: String,
    /// Whether the pattern must also match the checksum casing
    checksum: bool,
}

impl SearchPattern {
    /// Creates a new pattern. Casing is kept exactly as supplied.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>, checksum: bool) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            checksum,
        }
    }

    /// Returns a copy with prefix and suffix lowercased, the form workers
    /// search with. Uppercase input then behaves like its lowercase form.
    pub fn lowercased(&self) -> Self {
        Self {
            prefix: self.prefix.to_ascii_lowercase(),
            suffix: self.suffix.to_ascii_lowercase(),
            checksum: self.checksum,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_checksum(&self) -> bool {
        self.checksum
    }

    /// Matches an address against this pattern.
    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        self.is_match(&address.to_hex())
    }

    /// Matches a 40-char lowercase hex address (no `0x`) against this pattern.
    ///
    /// Without checksum mode the comparison ignores case. In checksum mode two
    /// checks must both pass: the pattern must equal the raw lowercase
    /// substrings literally, and every pattern character must equal the
    /// checksum-cased address character at the same position. A pattern
    /// letter therefore only matches where the checksum leaves it lowercase.
    ///
    /// Patterns that do not fit in the address never match.
    pub fn is_match(&self, address: &str) -> bool {
        if address.len() != ADDRESS_HEX_LEN
            || self.prefix.len() + self.suffix.len() > ADDRESS_HEX_LEN
        {
            return false;
        }

        let suffix_start = ADDRESS_HEX_LEN - self.suffix.len();
        let (Some(address_prefix), Some(address_suffix)) = (
            address.get(..self.prefix.len()),
            address.get(suffix_start..),
        ) else {
            return false;
        };

        if !self.checksum {
            return self.prefix.eq_ignore_ascii_case(address_prefix)
                && self.suffix.eq_ignore_ascii_case(address_suffix);
        }

        if self.prefix != address_prefix || self.suffix != address_suffix {
            return false;
        }

        let digest = keccak_digest(address);

        let prefix_ok = self
            .prefix
            .chars()
            .zip(address_prefix.chars())
            .enumerate()
            .all(|(i, (p, a))| p == check_char(a, i, &digest));

        prefix_ok
            && self
                .suffix
                .chars()
                .zip(address_suffix.chars())
                .enumerate()
                .all(|(i, (p, a))| p == check_char(a, suffix_start + i, &digest))
    }

    /// Returns the estimated difficulty (number of attempts to find a match).
    ///
    /// Each pattern character has 16 possible values. In checksum mode every
    /// letter additionally has to come out lowercase, halving its odds.
    pub fn estimated_difficulty(&self) -> u64 {
        let total_len = self.prefix.len() + self.suffix.len();
        let base = 16u64.saturating_pow(total_len as u32);

        if !self.checksum {
            return base;
        }

        let letters = self
            .prefix
            .chars()
            .chain(self.suffix.chars())
            .filter(|c| c.is_ascii_alphabetic())
            .count();
        base.saturating_mul(2u64.saturating_pow(letters as u32))
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}
