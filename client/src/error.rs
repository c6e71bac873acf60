//! Error types for the pool client.
//!
//! Every public operation returns [`PoolError`]. The variants separate
//! "my input was wrong" from "the service said no" from "the service sent
//! something we cannot read", so callers can pick a retry strategy per kind.

use thiserror::Error;

use crate::crypto::KeyError;

/// Fixed messages for precondition failures. Callers match on these, so
/// they are part of the public contract.
pub mod msg {
    pub const TX_LIST_INVALID: &str = "TxList is invalid";
    pub const SEQS_INVALID: &str = "Seqs is invalid";
    pub const SEQS_LENGTH_MISMATCH: &str = "Seqs quantity is not equal to tx quantity";
    pub const SECRET_INVALID: &str = "Secret is invalid";
    pub const PUBLIC_KEY_INVALID: &str = "PublicKey is invalid";
    pub const SIGNED_ADDR_INVALID: &str = "SignedAddr is invalid";
    pub const FROM_CHAIN_INVALID: &str = "FromChain is invalid";
    pub const COUNT_INVALID: &str = "Count is invalid";
    pub const STATE_INVALID: &str = "State is invalid";
    pub const DATA_HASH_SIGN_INVALID: &str = "DataHashSign is invalid";
    pub const DATA_JSON_STR_INVALID: &str = "DataJsonStr is invalid";
}

/// Coarse classification of a [`PoolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A precondition on caller-supplied data failed.
    InvalidInput,
    /// The pool service answered with a non-success envelope code.
    RemoteRejection,
    /// The pool service answered with a success code but malformed data.
    Protocol,
    /// The request never produced a response (connect failure, timeout).
    Transport,
}

/// Errors surfaced by validation, signing and pool service calls.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Raised synchronously, before any network call or signing work.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The service rejected the request. `code` and `msg` are verbatim.
    #[error("remote rejection: code={code}, msg={msg}")]
    RemoteRejection {
        /// Envelope code as sent by the service, rendered as a string.
        code: String,
        /// Envelope message as sent by the service.
        msg: String,
    },

    /// The service returned success with data of the wrong shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The HTTP layer failed before a response envelope was available.
    #[error("transport error: {0}")]
    Transport(String),
}

impl PoolError {
    /// Shorthand for [`PoolError::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Shorthand for [`PoolError::Protocol`].
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::RemoteRejection { .. } => ErrorKind::RemoteRejection,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Only transport failures are worth retrying as-is. The client never
    /// retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<KeyError> for PoolError {
    /// A rejected secret always reads as `"Secret is invalid"`; other key
    /// failures keep their own description.
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidSecret => Self::invalid(msg::SECRET_INVALID),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl From<std::convert::Infallible> for PoolError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
