//! Query parameters and records exchanged with the pool service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{msg, PoolError};

// ---------------------------------------------------------------------------
// FromChain
// ---------------------------------------------------------------------------

/// Where the pool reads the account's current sequence from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FromChain {
    /// Continue from the pool's own counter (`0`).
    Pool,
    /// Re-read the account sequence from the chain (`1`).
    Chain,
}

impl FromChain {
    /// Wire value, `0` or `1`.
    pub fn as_wire(&self) -> u8 {
        match self {
            Self::Pool => 0,
            Self::Chain => 1,
        }
    }
}

impl From<bool> for FromChain {
    fn from(take_from_chain: bool) -> Self {
        if take_from_chain {
            Self::Chain
        } else {
            Self::Pool
        }
    }
}

impl TryFrom<i64> for FromChain {
    type Error = PoolError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pool),
            1 => Ok(Self::Chain),
            _ => Err(PoolError::invalid(msg::FROM_CHAIN_INVALID)),
        }
    }
}

// ---------------------------------------------------------------------------
// TxState
// ---------------------------------------------------------------------------

/// Lifecycle state of a submitted transaction, as numbered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TxState {
    /// Accepted by the pool, not yet sent to the chain.
    Pending = 1,
    /// Sent to the chain, awaiting a result.
    Submitted = 2,
    /// On chain. Terminal.
    Confirmed = 3,
    /// Failed on chain and cancelable. Terminal.
    Failed = 4,
}

impl TxState {
    pub fn as_wire(&self) -> u8 {
        *self as u8
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl TryFrom<u8> for TxState {
    type Error = PoolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pending),
            2 => Ok(Self::Submitted),
            3 => Ok(Self::Confirmed),
            4 => Ok(Self::Failed),
            _ => Err(PoolError::invalid(msg::STATE_INVALID)),
        }
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// QueryScope
// ---------------------------------------------------------------------------

/// The `count` parameter of a submitted-records query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    /// Most recent record only.
    One,
    /// Every matching record.
    All,
    /// Only the number of matching records.
    Total,
    /// A deployment-specific token, passed through verbatim.
    Custom(String),
}

impl QueryScope {
    /// Wire token. Fails for an empty custom token.
    pub fn as_wire(&self) -> Result<&str, PoolError> {
        match self {
            Self::One => Ok("one"),
            Self::All => Ok("all"),
            Self::Total => Ok("total"),
            Self::Custom(token) if token.trim().is_empty() => {
                Err(PoolError::invalid(msg::COUNT_INVALID))
            }
            Self::Custom(token) => Ok(token),
        }
    }
}

impl From<&str> for QueryScope {
    fn from(token: &str) -> Self {
        match token {
            "one" => Self::One,
            "all" => Self::All,
            "total" => Self::Total,
            other => Self::Custom(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SubmittedRecord
// ---------------------------------------------------------------------------

/// A server-side record of one submitted transaction. Read-only.
///
/// Only the fields the client interprets are typed; everything else the
/// service sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    /// Raw state code. See [`SubmittedRecord::state`].
    #[serde(deserialize_with = "lenient_u8")]
    pub tx_state: u8,
    /// Missing or `null` reads as `0`.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub submit_count: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub check_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_seq: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmittedRecord {
    /// The state as a known [`TxState`], or `None` for codes this client
    /// does not know.
    pub fn state(&self) -> Option<TxState> {
        TxState::try_from(self.tx_state).ok()
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `4` or `"4"`.
fn lenient_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u8),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
