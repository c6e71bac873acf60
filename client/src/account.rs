//! Account identity derived from a secret.
//!
//! A [`Credential`] holds the key pair and address for exactly one
//! operation. It is opened from a secret, used, and dropped; the private key
//! zeroizes on drop. Nothing in the crate caches one.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::{KeyPair, SigningCapability};
use crate::error::{msg, PoolError};

/// Public identity of an account, as the pool service expects it.
///
/// `signed_address` is a signature over the hex encoding of the address
/// string, proving control of the key behind `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    pub signed_address: String,
    pub public_key: String,
}

/// Key material scoped to a single operation.
pub struct Credential {
    key_pair: KeyPair,
    address: String,
}

impl Credential {
    /// Validates `secret` and derives its key pair and address.
    ///
    /// An empty or undecodable secret fails with `"Secret is invalid"`.
    pub fn open<S: SigningCapability + ?Sized>(
        signer: &S,
        secret: &str,
    ) -> Result<Self, PoolError> {
        if secret.is_empty() || !signer.is_valid_secret(secret) {
            return Err(PoolError::invalid(msg::SECRET_INVALID));
        }
        let key_pair = signer.derive_key_pair(secret)?;
        let address = signer.derive_address(key_pair.public_key())?;
        Ok(Self { key_pair, address })
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn public_key(&self) -> &str {
        self.key_pair.public_key()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Signs the hex encoding of `text`'s UTF-8 bytes.
    pub fn sign_text<S: SigningCapability + ?Sized>(
        &self,
        signer: &S,
        text: &str,
    ) -> Result<String, PoolError> {
        Ok(signer.sign(&hex::encode(text.as_bytes()), self.key_pair.private_key())?)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derives the address, public key and address attestation for `secret`.
///
/// Deterministic: the same secret always yields the same [`Account`].
pub fn get_address_public_key<S: SigningCapability + ?Sized>(
    signer: &S,
    secret: &str,
) -> Result<Account, PoolError> {
    let credential = Credential::open(signer, secret)?;
    let signed_address = credential.sign_text(signer, credential.address())?;
    debug!(address = %credential.address(), "derived account identity");

    Ok(Account {
        address: credential.address().to_string(),
        signed_address,
        public_key: credential.public_key().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
