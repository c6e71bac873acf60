//! Batch signing.
//!
//! [`sign_batch`] pairs each record with its reserved sequence, signs the
//! records in input order, serializes the signed list and signs the integrity
//! hash of that serialization. It performs no I/O.
//!
//! Preconditions are checked in a fixed order and fail fast, before any key
//! is derived:
//!
//! 1. `"TxList is invalid"`
//! 2. `"Seqs is invalid"` (no sequences at all)
//! 3. `"Seqs quantity is not equal to tx quantity"`
//! 4. `"Secret is invalid"`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::record::{SequencedTransaction, TransactionRecord};
use super::validation::{validate_tx_list, validate_tx_list_values};
use crate::account::Credential;
use crate::crypto::SigningCapability;
use crate::error::{msg, PoolError};

/// One signed record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    /// Hex blob of the signed transaction.
    pub tx_sign: String,
    /// Transaction ID.
    pub tx_hash: String,
    /// Address of the signing account.
    pub tx_addr: String,
    /// Sequence the record was signed under.
    pub tx_seq: u32,
}

/// The unit submitted to the pool service.
///
/// Serializes to the submit body, `{"dataHashSign": .., "dataJsonStr": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSubmissionPayload {
    /// Signature over the hex encoding of the integrity hash.
    #[serde(rename = "dataHashSign")]
    pub integrity_hash_signature: String,
    /// JSON array of [`SignedTransaction`], in input order.
    #[serde(rename = "dataJsonStr")]
    pub serialized_batch: String,
}

impl BatchSubmissionPayload {
    /// Parses `serialized_batch` back into the ordered signed list.
    pub fn signed_transactions(&self) -> Result<Vec<SignedTransaction>, PoolError> {
        serde_json::from_str(&self.serialized_batch)
            .map_err(|e| PoolError::invalid(format!("{}: {}", msg::DATA_JSON_STR_INVALID, e)))
    }
}

/// Serializes a signed list. Field order is fixed by [`SignedTransaction`],
/// so the same list always yields the same string.
pub fn serialize_batch(signed: &[SignedTransaction]) -> Result<String, PoolError> {
    serde_json::to_string(signed)
        .map_err(|e| PoolError::invalid(format!("batch could not be serialized: {}", e)))
}

/// Signs `tx_list` under `seqs`, one sequence per record.
pub fn sign_batch<S: SigningCapability + ?Sized>(
    signer: &S,
    tx_list: &[TransactionRecord],
    seqs: &[u32],
    secret: &str,
) -> Result<BatchSubmissionPayload, PoolError> {
    validate_tx_list(signer, tx_list)?;
    if seqs.is_empty() {
        return Err(PoolError::invalid(msg::SEQS_INVALID));
    }
    if seqs.len() != tx_list.len() {
        debug!(
            txs = tx_list.len(),
            seqs = seqs.len(),
            "sequence count does not match transaction count"
        );
        return Err(PoolError::invalid(msg::SEQS_LENGTH_MISMATCH));
    }

    let credential = Credential::open(signer, secret)?;
    debug!(address = %credential.address(), txs = tx_list.len(), "signing batch");

    let signed = tx_list
        .iter()
        .zip(seqs)
        .map(|(record, &sequence)| {
            let tx = SequencedTransaction::new(record, sequence);
            let blob = signer.sign_transaction(&tx, credential.key_pair())?;
            Ok::<_, PoolError>(SignedTransaction {
                tx_sign: blob.blob,
                tx_hash: blob.hash,
                tx_addr: credential.address().to_string(),
                tx_seq: sequence,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let serialized_batch = serialize_batch(&signed)?;
    let integrity_hash = signer.hash(&serialized_batch);
    let integrity_hash_signature = credential.sign_text(signer, &integrity_hash)?;

    info!(
        address = %credential.address(),
        txs = signed.len(),
        first_seq = seqs[0],
        "batch signed"
    );

    Ok(BatchSubmissionPayload {
        integrity_hash_signature,
        serialized_batch,
    })
}

/// [`sign_batch`] for untyped records: parse and validate, then sign.
pub fn sign_raw_batch<S: SigningCapability + ?Sized>(
    signer: &S,
    values: &[Value],
    seqs: &[u32],
    secret: &str,
) -> Result<BatchSubmissionPayload, PoolError> {
    let records = validate_tx_list_values(signer, values)?;
    sign_batch(signer, &records, seqs, secret)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
