//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use txpool_client::config::SEED_LENGTH;
use txpool_client::crypto::{KeyError, KeyPair, PrivateKey, TransactionBlob};
use txpool_client::transaction::SequencedTransaction;
use txpool_client::{
    Ed25519Signer, PoolError, PoolRequest, ResponseEnvelope, SigningCapability, Transport,
};

pub const ADDR: &str = "jhKUg4uyE1f4H3BZbWQ5HXCh99ChZSdpPj";

/// Transport that replays canned envelopes and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ResponseEnvelope>>,
    requests: Mutex<Vec<PoolRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<ResponseEnvelope>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PoolRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: PoolRequest) -> Result<ResponseEnvelope, PoolError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PoolError::Transport("mock has no response left".into()))
    }
}

/// Deterministic signer that records how often each key operation runs.
///
/// Only [`FAKE_SECRET`] is valid. Transaction blobs read
/// `<TransactionType>@<Sequence>` so tests can check order without Ed25519.
#[derive(Default)]
pub struct CountingSigner {
    derive_calls: AtomicUsize,
    sign_calls: AtomicUsize,
    sign_tx_calls: AtomicUsize,
}

pub const FAKE_SECRET: &str = "fake-secret";
pub const FAKE_PUBLIC_KEY: &str = "FAKEPUB";
pub const FAKE_ADDRESS: &str = "jFakeAccount";

impl CountingSigner {
    pub fn derive_calls(&self) -> usize {
        self.derive_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn sign_tx_calls(&self) -> usize {
        self.sign_tx_calls.load(Ordering::SeqCst)
    }

    pub fn total_key_calls(&self) -> usize {
        self.derive_calls() + self.sign_calls() + self.sign_tx_calls()
    }
}

impl SigningCapability for CountingSigner {
    fn is_valid_secret(&self, secret: &str) -> bool {
        secret == FAKE_SECRET
    }

    fn derive_key_pair(&self, secret: &str) -> Result<KeyPair, KeyError> {
        self.derive_calls.fetch_add(1, Ordering::SeqCst);
        if !self.is_valid_secret(secret) {
            return Err(KeyError::InvalidSecret);
        }
        Ok(KeyPair::new(PrivateKey::from_bytes(vec![1; 32]), FAKE_PUBLIC_KEY))
    }

    fn derive_address(&self, _public_key: &str) -> Result<String, KeyError> {
        Ok(FAKE_ADDRESS.to_string())
    }

    fn sign(&self, message_hex: &str, _private_key: &PrivateKey) -> Result<String, KeyError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("SIG{}", message_hex))
    }

    fn sign_transaction(
        &self,
        tx: &SequencedTransaction<'_>,
        _key_pair: &KeyPair,
    ) -> Result<TransactionBlob, KeyError> {
        self.sign_tx_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TransactionBlob {
            blob: format!("{}@{}", tx.record.kind(), tx.sequence),
            hash: format!("H{}", tx.sequence),
        })
    }

    fn is_valid_address(&self, address: &str) -> bool {
        address.starts_with('j')
    }

    fn hash(&self, message: &str) -> String {
        hex::encode(message.len().to_be_bytes())
    }
}

pub fn secret() -> String {
    Ed25519Signer::encode_secret(&[0x5a; SEED_LENGTH])
}

pub fn offer_cancel(offer_sequence: u32) -> Value {
    json!({
        "TransactionType": "OfferCancel",
        "Account": ADDR,
        "Fee": 0.00001,
        "Flags": 0,
        "OfferSequence": offer_sequence,
    })
}

pub fn offer_create() -> Value {
    json!({
        "TransactionType": "OfferCreate",
        "Account": ADDR,
        "Fee": 0.00001,
        "Flags": 0x0008_0000,
        "Platform": "",
        "TakerGets": {"value": "100", "currency": "SWT", "issuer": ""},
        "TakerPays": {"value": "2.5", "currency": "CNY", "issuer": ADDR},
    })
}

pub fn payment() -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": ADDR,
        "Amount": "25",
        "Destination": ADDR,
        "Fee": 0.00001,
        "Flags": 0,
        "Memos": [],
    })
}
