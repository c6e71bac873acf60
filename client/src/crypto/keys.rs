//! # Key Material
//!
//! Secrets, key pairs and the base58check codec used for ledger addresses
//! and secrets.
//!
//! ## Lifetime of secret material
//!
//! A [`KeyPair`] is derived inside a single signing call and dropped before
//! that call returns, on success and on every error path. The private half
//! sits in [`PrivateKey`], a `Zeroizing` buffer, so dropping it wipes the
//! bytes. Nothing in this crate caches a derived key across calls.
//!
//! Key bytes are never logged and `Debug` output is redacted.

use std::fmt;

use bs58::Alphabet;
use thiserror::Error;
use zeroize::Zeroizing;

use super::hash::double_sha256;
use crate::config::{CHECKSUM_LENGTH, LEDGER_ALPHABET};

static ALPHABET: Alphabet = Alphabet::new_unwrap(LEDGER_ALPHABET);

/// Errors from key derivation and signing.
///
/// Deliberately vague about *why* a secret was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("secret is not a valid encoded seed")]
    InvalidSecret,

    #[error("public key is malformed")]
    InvalidPublicKey,

    #[error("private key is malformed")]
    InvalidPrivateKey,

    #[error("message is not valid hex")]
    InvalidMessage,

    #[error("transaction could not be encoded: {0}")]
    Encoding(String),
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// Scheme-agnostic private key bytes, wiped on drop.
///
/// Intentionally not `Clone`, `Serialize` or `Display`.
pub struct PrivateKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    /// Takes ownership of raw key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A derived key pair, scoped to the call that derived it.
///
/// `public_key` is the hex form that appears on the wire and in pool URLs.
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: String,
}

impl KeyPair {
    pub fn new(private_key: PrivateKey, public_key: impl Into<String>) -> Self {
        Self {
            private_key,
            public_key: public_key.into(),
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key)
    }
}

// ---------------------------------------------------------------------------
// Base58check
// ---------------------------------------------------------------------------

/// Encodes `version || payload || checksum` in the ledger alphabet.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(1 + payload.len() + CHECKSUM_LENGTH);
    buf.push(version);
    buf.extend_from_slice(payload);
    let checksum = double_sha256(&buf);
    buf.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    bs58::encode(buf).with_alphabet(&ALPHABET).into_string()
}

/// Decodes a base58check string and returns the payload, provided the
/// version byte, payload length and checksum all match.
///
/// Returns `None` on any mismatch. Callers map that into their own error.
pub fn decode_check(encoded: &str, version: u8, payload_len: usize) -> Option<Vec<u8>> {
    let raw = bs58::decode(encoded)
        .with_alphabet(&ALPHABET)
        .into_vec()
        .ok()?;

    if raw.len() != 1 + payload_len + CHECKSUM_LENGTH || raw[0] != version {
        return None;
    }

    let (body, checksum) = raw.split_at(raw.len() - CHECKSUM_LENGTH);
    if double_sha256(body)[..CHECKSUM_LENGTH] != *checksum {
        return None;
    }

    Some(body[1..].to_vec())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ACCOUNT_ID_LENGTH, ADDRESS_VERSION, SECRET_VERSION, SEED_LENGTH};

    const KNOWN_ADDRESS: &str = "jhKUg4uyE1f4H3BZbWQ5HXCh99ChZSdpPj";

    #[test]
    fn decodes_known_address() {
        let id = decode_check(KNOWN_ADDRESS, ADDRESS_VERSION, ACCOUNT_ID_LENGTH).unwrap();
        assert_eq!(hex::encode(id), "24599d1e2a7aa494babdebec200acdb82643b1ed");
    }

    #[test]
    fn reencodes_known_address() {
        let id = decode_check(KNOWN_ADDRESS, ADDRESS_VERSION, ACCOUNT_ID_LENGTH).unwrap();
        assert_eq!(encode_check(ADDRESS_VERSION, &id), KNOWN_ADDRESS);
    }

    #[test]
    fn rejects_corrupted_checksum() {
        // Swap the last character for a different alphabet symbol.
        let mut corrupted = KNOWN_ADDRESS[..KNOWN_ADDRESS.len() - 1].to_string();
        corrupted.push('k');
        assert!(decode_check(&corrupted, ADDRESS_VERSION, ACCOUNT_ID_LENGTH).is_none());
    }

    #[test]
    fn rejects_wrong_version_and_length() {
        assert!(decode_check(KNOWN_ADDRESS, SECRET_VERSION, ACCOUNT_ID_LENGTH).is_none());
        assert!(decode_check(KNOWN_ADDRESS, ADDRESS_VERSION, SEED_LENGTH).is_none());
    }

    #[test]
    fn rejects_foreign_alphabet() {
        // '0' and 'l' are not in the ledger alphabet.
        assert!(decode_check("j0l", ADDRESS_VERSION, ACCOUNT_ID_LENGTH).is_none());
        assert!(decode_check("", ADDRESS_VERSION, ACCOUNT_ID_LENGTH).is_none());
    }

    #[test]
    fn secrets_start_with_s() {
        let secret = encode_check(SECRET_VERSION, &[0u8; SEED_LENGTH]);
        assert!(secret.starts_with('s'));
        let seed = decode_check(&secret, SECRET_VERSION, SEED_LENGTH).unwrap();
        assert_eq!(seed, vec![0u8; SEED_LENGTH]);
    }

    #[test]
    fn debug_output_is_redacted() {
        let kp = KeyPair::new(PrivateKey::from_bytes(vec![0xAB; 32]), "ED00");
        let dbg = format!("{:?} {:?}", kp, kp.private_key());
        assert!(!dbg.to_lowercase().contains("abab"));
        assert!(dbg.contains("ED00"));
    }
}
