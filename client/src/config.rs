//! # Client Configuration & Constants
//!
//! Every wire constant the client depends on lives here, next to the
//! [`PoolConfig`] that callers hand to the pool client. If a number shows up
//! in two modules, it belongs in this file instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crypto::hash::HashAlgorithm;
use crate::error::PoolError;

// ---------------------------------------------------------------------------
// Ledger Encoding
// ---------------------------------------------------------------------------

/// Base58 alphabet used by ledger addresses and secrets. Version byte 0
/// encodes to a leading `j`, which is how addresses are recognized by eye.
pub const LEDGER_ALPHABET: &[u8; 58] =
    b"jpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65rkm8oFqi1tuvAxyz";

/// Version byte prefixed to a 20-byte account ID before base58check encoding.
pub const ADDRESS_VERSION: u8 = 0x00;

/// Version byte prefixed to a 16-byte seed. Encodes to a leading `s`.
pub const SECRET_VERSION: u8 = 0x21;

/// Length of the raw seed carried inside a secret.
pub const SEED_LENGTH: usize = 16;

/// Length of an account ID (RIPEMD-160 output).
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// Length of the base58check checksum suffix.
pub const CHECKSUM_LENGTH: usize = 4;

/// Prefix byte on Ed25519 public keys, so they are distinguishable from
/// 33-byte compressed secp256k1 keys on the wire.
pub const ED25519_KEY_PREFIX: u8 = 0xED;

/// Hash prefix for the bytes a transaction signature covers (`"STX\0"`).
pub const SIGNING_PREFIX: &[u8; 4] = b"STX\0";

/// Hash prefix for transaction IDs (`"TXN\0"`).
pub const TX_ID_PREFIX: &[u8; 4] = b"TXN\0";

// ---------------------------------------------------------------------------
// Transaction Flags
// ---------------------------------------------------------------------------

/// No flags set. The only value accepted for `OfferCancel` and `Payment`.
pub const FLAGS_NONE: u32 = 0;

/// `tfSell` on `OfferCreate`: exchange the full `TakerGets` amount even if
/// that yields more than `TakerPays`.
pub const FLAG_SELL: u32 = 0x0008_0000;

// ---------------------------------------------------------------------------
// Pool Service
// ---------------------------------------------------------------------------

/// Default pool service base URL. Devnet-style local default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Envelope code the pool service uses for success.
pub const SUCCESS_CODE: i64 = 0;

/// Path prefixes for the pool endpoints. Each is followed by
/// `/{publicKey}`.
pub const SEQUENCES_PATH: &str = "/sequences";
pub const SUBMIT_PATH: &str = "/submit";
pub const SUBMITTED_PATH: &str = "/submitted";
pub const CANCEL_PATH: &str = "/cancel";

/// How long after a submission a `Failed` query is expected to be
/// meaningful. Deployment timing, not a protocol guarantee: with many
/// addresses in flight the service may still be working through the batch.
pub const SETTLE_PROBE_DELAY: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ENV_BASE_URL: &str = "TXPOOL_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "TXPOOL_TIMEOUT_MS";
pub const ENV_HASH: &str = "TXPOOL_HASH";

// ---------------------------------------------------------------------------
// PoolConfig
// ---------------------------------------------------------------------------

/// Caller-held configuration for a pool client.
///
/// `hash_algorithm` must match whatever the pool service computes over the
/// serialized batch, otherwise every integrity proof is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Base URL of the pool service, without a trailing slash.
    pub base_url: String,

    /// Upper bound on a single request, including connect time.
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,

    /// Digest used for the batch integrity proof.
    pub hash_algorithm: HashAlgorithm,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            hash_algorithm: HashAlgorithm::Sm3,
        }
    }
}

impl PoolConfig {
    /// Creates a config pointing at `base_url` with default timeout and hash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builder-style timeout override.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder-style hash override.
    pub fn with_hash(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    /// Defaults overridden by `TXPOOL_BASE_URL`, `TXPOOL_TIMEOUT_MS` and
    /// `TXPOOL_HASH` where set.
    pub fn from_env() -> Result<Self, PoolError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PoolError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| PoolError::invalid(format!("{} is not an integer", ENV_TIMEOUT_MS)))?;
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(name) = lookup(ENV_HASH) {
            config.hash_algorithm = name.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the fields a client cannot work without.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.base_url.trim().is_empty() {
            return Err(PoolError::invalid("BaseUrl is invalid"));
        }
        if self.request_timeout.is_zero() {
            return Err(PoolError::invalid("Timeout is invalid"));
        }
        Ok(())
    }

    /// `base_url` joined with `path`, tolerating a trailing slash on the base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
