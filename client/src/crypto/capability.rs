//! The signing seam.
//!
//! Everything the client needs from a key scheme goes through
//! [`SigningCapability`]: secret validation, key and address derivation,
//! raw signing, transaction signing, address validation and the integrity
//! hash. The batch signer and account facade are generic over it, which is
//! what lets tests swap in a deterministic fake.

use super::keys::{KeyError, KeyPair, PrivateKey};
use crate::transaction::record::SequencedTransaction;

/// Output of signing one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBlob {
    /// Hex-encoded signed transaction, ready for the ledger.
    pub blob: String,
    /// Hex-encoded transaction ID.
    pub hash: String,
}

/// Key-scheme operations consumed by the client.
///
/// Implementations must be deterministic: the same secret always derives
/// the same key pair and address, and the same message the same signature.
pub trait SigningCapability: Send + Sync {
    /// `true` if `secret` decodes to a seed this scheme accepts.
    fn is_valid_secret(&self, secret: &str) -> bool;

    /// Derives the key pair for `secret`. The result must not outlive the
    /// call that asked for it.
    fn derive_key_pair(&self, secret: &str) -> Result<KeyPair, KeyError>;

    /// Derives the ledger address for a hex public key.
    fn derive_address(&self, public_key: &str) -> Result<String, KeyError>;

    /// Signs the bytes encoded by `message_hex`, returning a hex signature.
    fn sign(&self, message_hex: &str, private_key: &PrivateKey) -> Result<String, KeyError>;

    /// Signs one sequenced transaction.
    fn sign_transaction(
        &self,
        tx: &SequencedTransaction<'_>,
        key_pair: &KeyPair,
    ) -> Result<TransactionBlob, KeyError>;

    /// `true` if `address` is a syntactically valid ledger address.
    fn is_valid_address(&self, address: &str) -> bool;

    /// Hex digest of `message`, computed the way the pool service does.
    fn hash(&self, message: &str) -> String;
}
