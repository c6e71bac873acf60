//! Structural validation of batch input.
//!
//! A list passes only if it is non-empty and every record passes
//! [`TransactionRecord::check`]. The caller sees a single fixed message,
//! `"TxList is invalid"`; the offending index and reason go to the debug log.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::record::TransactionRecord;
use crate::crypto::SigningCapability;
use crate::error::{msg, PoolError};

/// Validates typed records.
pub fn validate_tx_list<S: SigningCapability + ?Sized>(
    signer: &S,
    tx_list: &[TransactionRecord],
) -> Result<(), PoolError> {
    if tx_list.is_empty() {
        debug!("transaction list is empty");
        return Err(PoolError::invalid(msg::TX_LIST_INVALID));
    }
    for (index, record) in tx_list.iter().enumerate() {
        if let Err(reason) = record.check(signer) {
            debug!(index, kind = %record.kind(), reason, "transaction failed validation");
            return Err(PoolError::invalid(msg::TX_LIST_INVALID));
        }
    }
    Ok(())
}

/// Parses and validates untyped records.
///
/// Every element must be an object with a known `TransactionType` and all of
/// that variant's fields. Fields outside the variant are ignored and never
/// reach the signer.
pub fn validate_tx_list_values<S: SigningCapability + ?Sized>(
    signer: &S,
    values: &[Value],
) -> Result<Vec<TransactionRecord>, PoolError> {
    if values.is_empty() {
        debug!("transaction list is empty");
        return Err(PoolError::invalid(msg::TX_LIST_INVALID));
    }
    let records = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            TransactionRecord::deserialize(value).map_err(|e| {
                debug!(index, error = %e, "transaction failed to parse");
                PoolError::invalid(msg::TX_LIST_INVALID)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_tx_list(signer, &records)?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
