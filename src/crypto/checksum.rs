//! Mixed-case checksum encoding (EIP-55).
//!
//! The lowercase hex form of an address is hashed with Keccak-256. A letter
//! at position `i` is uppercased when the `i`-th nibble of that digest is
//! `>= 8`. Digits are unaffected.

use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 digest of an address's lowercase hex string.
pub type ChecksumDigest = [u8; 32];

/// Hashes the ASCII bytes of `lower_hex` (not the raw address bytes).
#[inline]
pub fn keccak_digest(lower_hex: &str) -> ChecksumDigest {
    let mut hasher = Keccak::v256();
    hasher.update(lower_hex.as_bytes());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    hash
}

/// Returns the `index`-th hex nibble of `digest`. `index` must be below 64.
#[inline]
fn nibble(digest: &ChecksumDigest, index: usize) -> u8 {
    let byte = digest[index / 2];
    if index % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}

/// Applies the checksum casing rule to a single address character.
///
/// `index` is the character's position in the 40-char address.
#[inline]
pub fn check_char(c: char, index: usize, digest: &ChecksumDigest) -> char {
    if nibble(digest, index) >= 8 {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

/// Encodes a 40-char lowercase hex address (no `0x`) in checksum casing.
///
/// Input longer than 64 characters is outside the digest and panics.
pub fn to_checksum_address(raw_hex: &str) -> String {
    let digest = keccak_digest(raw_hex);
    raw_hex
        .chars()
        .enumerate()
        .map(|(i, c)| check_char(c, i, &digest))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eip55_vectors() {
        let vectors = [
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "fB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "dbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "D1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ];

        for expected in vectors {
            let lower = expected.to_ascii_lowercase();
            assert_eq!(to_checksum_address(&lower), expected);
        }
    }

    #[test]
    fn test_digits_are_unchanged() {
        let raw = "0123456789012345678901234567890123456789";
        assert_eq!(to_checksum_address(raw), raw);
    }

    #[test]
    fn test_reapplication_is_stable() {
        for _ in 0..32 {
            let raw = hex::encode(rand::random::<[u8; 20]>());
            let once = to_checksum_address(&raw);
            let twice = to_checksum_address(&once.to_ascii_lowercase());
            assert_eq!(once, twice);
        }
    }

    #[test]
    #[should_panic]
    fn test_input_beyond_digest_panics() {
        to_checksum_address(&"a".repeat(65));
    }

    #[test]
    fn test_check_char_matches_full_encoding() {
        let raw = "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
        let digest = keccak_digest(raw);
        let full = to_checksum_address(raw);

        for (i, (c, expected)) in raw.chars().zip(full.chars()).enumerate() {
            assert_eq!(check_char(c, i, &digest), expected);
        }
    }
}
