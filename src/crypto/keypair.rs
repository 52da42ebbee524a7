//! Ethereum keypair generation.

use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
use tiny_keccak::{Hasher, Keccak};

use super::Address;

/// Errors raised when deriving a keypair from caller-supplied key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid secret key: scalar is zero or not below the curve order")]
    InvalidSecretKey,
}

/// Represents an Ethereum keypair (private key + derived address).
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    secret_key: [u8; 32],
    /// The derived Ethereum address
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair.
    ///
    /// Builds a fresh signing context; hot loops should hold one context and
    /// call [`Keypair::generate_with`] instead.
    pub fn generate() -> Self {
        let secp = Secp256k1::signing_only();
        Self::generate_with(&secp, &mut rand::thread_rng())
    }

    /// Generates a random keypair using the given context and RNG.
    ///
    /// Draws 32 bytes at a time and redraws whenever they do not form a valid
    /// secp256k1 scalar, so the returned address always comes from a usable key.
    #[inline]
    pub fn generate_with<C: Signing, R: RngCore + ?Sized>(
        secp: &Secp256k1<C>,
        rng: &mut R,
    ) -> Self {
        let mut secret_bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut secret_bytes);
            if let Ok(secret_key) = SecretKey::from_slice(&secret_bytes) {
                let public_key = PublicKey::from_secret_key(secp, &secret_key);
                return Self {
                    secret_key: secret_bytes,
                    address: Self::derive_address(&public_key),
                };
            }
        }
    }

    /// Derives the keypair for an existing secret key.
    pub fn from_secret_key(secret_bytes: [u8; 32]) -> Result<Self, KeyError> {
        let secp = Secp256k1::signing_only();
        let secret_key =
            SecretKey::from_slice(&secret_bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        Ok(Self {
            secret_key: secret_bytes,
            address: Self::derive_address(&public_key),
        })
    }

    /// Derives an Ethereum address from a secp256k1 public key.
    ///
    /// Process:
    /// 1. Serialize the public key in uncompressed form (65 bytes)
    /// 2. Remove the first byte (0x04 prefix)
    /// 3. Hash the remaining 64 bytes (X || Y) with Keccak-256
    /// 4. Take the last 20 bytes of the hash
    #[inline]
    fn derive_address(public_key: &PublicKey) -> Address {
        let public_key_bytes = public_key.serialize_uncompressed();

        let mut hasher = Keccak::v256();
        hasher.update(&public_key_bytes[1..]);

        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        let mut address_bytes = [0u8; 20];
        address_bytes.copy_from_slice(&hash[12..]);

        Address::from_bytes(address_bytes)
    }

    /// Returns the private key as a lowercase hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}
