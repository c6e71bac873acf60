//! Ed25519 implementation of [`SigningCapability`].
//!
//! Secrets are base58check-encoded 16-byte seeds. The Ed25519 signing key
//! is the first half of `SHA-512(seed)`; the wire public key is the 32-byte
//! verifying key behind an `0xED` prefix. Addresses are
//! `base58check(0x00 || RIPEMD-160(SHA-256(public key)))`.
//!
//! Ed25519 signatures are deterministic, which is what makes
//! `get_address_public_key` and batch signing repeatable.

use std::collections::BTreeMap;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::Value;
use zeroize::Zeroizing;

use super::capability::{SigningCapability, TransactionBlob};
use super::hash::{expand_seed, hash160, sha512_half, HashAlgorithm};
use super::keys::{decode_check, encode_check, KeyError, KeyPair, PrivateKey};
use crate::config::{
    ACCOUNT_ID_LENGTH, ADDRESS_VERSION, ED25519_KEY_PREFIX, SECRET_VERSION, SEED_LENGTH,
    SIGNING_PREFIX, TX_ID_PREFIX,
};
use crate::transaction::record::SequencedTransaction;

/// Deterministic Ed25519 signer with a configurable integrity hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signer {
    hash_algorithm: HashAlgorithm,
}

impl Default for Ed25519Signer {
    fn default() -> Self {
        Self::new(HashAlgorithm::Sm3)
    }
}

impl Ed25519Signer {
    pub fn new(hash_algorithm: HashAlgorithm) -> Self {
        Self { hash_algorithm }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Encodes a raw seed as a secret string (leading `s`).
    pub fn encode_secret(seed: &[u8; SEED_LENGTH]) -> String {
        encode_check(SECRET_VERSION, seed)
    }

    /// Fresh secret from the OS RNG.
    pub fn generate_secret() -> String {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        OsRng.fill_bytes(&mut *seed);
        Self::encode_secret(&seed)
    }

    /// Checks `signature_hex` over the bytes of `message_hex` against a wire
    /// public key. This is what the pool service does with an attestation.
    pub fn verify(&self, message_hex: &str, signature_hex: &str, public_key: &str) -> bool {
        let (Ok(message), Ok(sig_bytes)) = (hex::decode(message_hex), hex::decode(signature_hex))
        else {
            return false;
        };
        let Ok(verifying_key) = verifying_key_from_wire(public_key) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(sig_bytes.as_slice()) else {
            return false;
        };
        verifying_key
            .verify(&message, &Signature::from_bytes(&sig_bytes))
            .is_ok()
    }

    fn signing_key(private_key: &PrivateKey) -> Result<SigningKey, KeyError> {
        let bytes: Zeroizing<[u8; 32]> = Zeroizing::new(
            private_key
                .as_bytes()
                .try_into()
                .map_err(|_| KeyError::InvalidPrivateKey)?,
        );
        Ok(SigningKey::from_bytes(&bytes))
    }
}

fn public_key_to_wire(verifying_key: &VerifyingKey) -> String {
    let mut bytes = Vec::with_capacity(33);
    bytes.push(ED25519_KEY_PREFIX);
    bytes.extend_from_slice(verifying_key.as_bytes());
    hex::encode_upper(bytes)
}

fn verifying_key_from_wire(public_key: &str) -> Result<VerifyingKey, KeyError> {
    let bytes = hex::decode(public_key).map_err(|_| KeyError::InvalidPublicKey)?;
    match bytes.split_first() {
        Some((&ED25519_KEY_PREFIX, rest)) if rest.len() == 32 => {
            let mut arr = [0u8; 32];
            arr.copy_from_slice(rest);
            VerifyingKey::from_bytes(&arr).map_err(|_| KeyError::InvalidPublicKey)
        }
        _ => Err(KeyError::InvalidPublicKey),
    }
}

fn to_json_bytes(fields: &BTreeMap<String, Value>) -> Result<Vec<u8>, KeyError> {
    serde_json::to_vec(fields).map_err(|e| KeyError::Encoding(e.to_string()))
}

impl SigningCapability for Ed25519Signer {
    fn is_valid_secret(&self, secret: &str) -> bool {
        decode_check(secret, SECRET_VERSION, SEED_LENGTH).is_some()
    }

    fn derive_key_pair(&self, secret: &str) -> Result<KeyPair, KeyError> {
        let seed = Zeroizing::new(
            decode_check(secret, SECRET_VERSION, SEED_LENGTH).ok_or(KeyError::InvalidSecret)?,
        );
        let expanded = expand_seed(&seed);
        let signing_key = SigningKey::from_bytes(&expanded);
        let public_key = public_key_to_wire(&signing_key.verifying_key());

        Ok(KeyPair::new(
            PrivateKey::from_bytes(expanded.to_vec()),
            public_key,
        ))
    }

    fn derive_address(&self, public_key: &str) -> Result<String, KeyError> {
        // Parse first so garbage never gets an address.
        verifying_key_from_wire(public_key)?;
        let bytes = hex::decode(public_key).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(encode_check(ADDRESS_VERSION, &hash160(&bytes)))
    }

    fn sign(&self, message_hex: &str, private_key: &PrivateKey) -> Result<String, KeyError> {
        let message = hex::decode(message_hex).map_err(|_| KeyError::InvalidMessage)?;
        let signing_key = Self::signing_key(private_key)?;
        Ok(hex::encode_upper(signing_key.sign(&message).to_bytes()))
    }

    fn sign_transaction(
        &self,
        tx: &SequencedTransaction<'_>,
        key_pair: &KeyPair,
    ) -> Result<TransactionBlob, KeyError> {
        let signing_key = Self::signing_key(key_pair.private_key())?;

        let mut fields = tx
            .fields()
            .map_err(|e| KeyError::Encoding(e.to_string()))?;
        fields.insert(
            "SigningPubKey".to_string(),
            Value::String(key_pair.public_key().to_string()),
        );

        let mut signable = SIGNING_PREFIX.to_vec();
        signable.extend_from_slice(&to_json_bytes(&fields)?);
        let signature = signing_key.sign(&signable);

        fields.insert(
            "TxnSignature".to_string(),
            Value::String(hex::encode_upper(signature.to_bytes())),
        );
        let blob_bytes = to_json_bytes(&fields)?;

        Ok(TransactionBlob {
            blob: hex::encode_upper(&blob_bytes),
            hash: hex::encode_upper(sha512_half(&[
                TX_ID_PREFIX.as_slice(),
                blob_bytes.as_slice(),
            ])),
        })
    }

    fn is_valid_address(&self, address: &str) -> bool {
        decode_check(address, ADDRESS_VERSION, ACCOUNT_ID_LENGTH).is_some()
    }

    fn hash(&self, message: &str) -> String {
        self.hash_algorithm.digest_hex(message.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
