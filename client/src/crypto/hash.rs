//! # Hashing Utilities
//!
//! Two families of hashing live here:
//!
//! - **Ledger hashes** with fixed roles: double-SHA-256 for base58check
//!   checksums, SHA-512-half for transaction IDs and Ed25519 seed expansion
//!   ([`expand_seed`] wipes the discarded half),
//!   and `RIPEMD-160(SHA-256(..))` for account IDs.
//!
//! - **The integrity hash**, selected by [`HashAlgorithm`]. The pool service
//!   recomputes it over the serialized batch, so client and server must
//!   agree on the algorithm. SM3 is the reference deployment; SHA-256 and
//!   BLAKE3 exist for services that chose differently.

use std::fmt;
use std::str::FromStr;

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sm3::Sm3;
use zeroize::{Zeroize, Zeroizing};

use crate::error::PoolError;

// ---------------------------------------------------------------------------
// HashAlgorithm
// ---------------------------------------------------------------------------

/// Digest used for the batch integrity proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// GB/T 32905-2016. 32-byte output.
    Sm3,
    /// FIPS 180-4 SHA-256.
    Sha256,
    /// BLAKE3 in its default 32-byte mode.
    Blake3,
}

impl HashAlgorithm {
    /// Raw 32-byte digest of `data`.
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        match self {
            Self::Sm3 => Sm3::digest(data).into(),
            Self::Sha256 => sha256(data),
            Self::Blake3 => *blake3::hash(data).as_bytes(),
        }
    }

    /// Lowercase hex digest of `data`. This is the form that gets signed.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        hex::encode(self.digest(data))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sm3 => write!(f, "sm3"),
            Self::Sha256 => write!(f, "sha256"),
            Self::Blake3 => write!(f, "blake3"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sm3" => Ok(Self::Sm3),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(PoolError::invalid(format!(
                "unsupported hash algorithm: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger hashes
// ---------------------------------------------------------------------------

/// SHA-256 as a fixed-size array.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `SHA-256(SHA-256(data))`. Base58check checksums take the first 4 bytes.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// First 32 bytes of SHA-512 over the concatenation of `parts`.
pub fn sha512_half(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let full = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&full[..32]);
    out
}

/// SHA-512-half of a secret seed. Both halves of the digest are wiped when
/// dropped; only the returned half survives.
pub fn expand_seed(seed: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut full = Sha512::digest(seed);
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(&full[..32]);
    full[..].zeroize();
    out
}

/// `RIPEMD-160(SHA-256(data))`. Account IDs are this over the public key.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(sha256(data)));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
