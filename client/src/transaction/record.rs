//! The closed set of transaction records the pool accepts.
//!
//! A [`TransactionRecord`] is one of three variants, each carrying exactly
//! its required fields. The JSON tag is `TransactionType`; field names are
//! the ledger's PascalCase names. Unknown tags and missing fields fail to
//! deserialize, which is how raw input gets rejected.
//!
//! Records never carry a `Sequence`. The batch signer pairs each record with
//! its reserved sequence in a [`SequencedTransaction`] instead of writing
//! into the caller's record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::types::{Amount, Memo, TokenAmount, TransactionKind};
use crate::config::{FLAGS_NONE, FLAG_SELL};
use crate::crypto::SigningCapability;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCreate {
    pub account: String,
    pub fee: Number,
    pub flags: u32,
    /// Platform identifier; may be empty.
    pub platform: String,
    pub taker_gets: TokenAmount,
    pub taker_pays: TokenAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCancel {
    pub account: String,
    pub fee: Number,
    pub flags: u32,
    /// Sequence of the `OfferCreate` being withdrawn.
    pub offer_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub account: String,
    pub amount: Amount,
    pub destination: String,
    pub fee: Number,
    pub flags: u32,
    /// Required, but may be empty.
    pub memos: Vec<Memo>,
}

/// A transaction record, tagged by `TransactionType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum TransactionRecord {
    OfferCreate(OfferCreate),
    OfferCancel(OfferCancel),
    Payment(Payment),
}

impl TransactionRecord {
    /// Parses one raw record. Any shape mismatch is an error.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::OfferCreate(_) => TransactionKind::OfferCreate,
            Self::OfferCancel(_) => TransactionKind::OfferCancel,
            Self::Payment(_) => TransactionKind::Payment,
        }
    }

    pub fn account(&self) -> &str {
        match self {
            Self::OfferCreate(tx) => &tx.account,
            Self::OfferCancel(tx) => &tx.account,
            Self::Payment(tx) => &tx.account,
        }
    }

    /// The fee as written by the caller. An integer fee stays an integer.
    pub fn fee(&self) -> &Number {
        match self {
            Self::OfferCreate(tx) => &tx.fee,
            Self::OfferCancel(tx) => &tx.fee,
            Self::Payment(tx) => &tx.fee,
        }
    }

    pub fn flags(&self) -> u32 {
        match self {
            Self::OfferCreate(tx) => tx.flags,
            Self::OfferCancel(tx) => tx.flags,
            Self::Payment(tx) => tx.flags,
        }
    }

    /// Checks the per-variant rules that the type system cannot express:
    /// address validity, fee range and the allowed flag values.
    pub fn check<S: SigningCapability + ?Sized>(&self, signer: &S) -> Result<(), &'static str> {
        if !signer.is_valid_address(self.account()) {
            return Err("Account is not a valid address");
        }
        match self.fee().as_f64() {
            Some(fee) if fee.is_finite() && fee >= 0.0 => {}
            _ => return Err("Fee is not a non-negative number"),
        }

        match self {
            Self::OfferCreate(tx) => {
                if tx.flags != FLAGS_NONE && tx.flags != FLAG_SELL {
                    return Err("OfferCreate Flags must be 0 or tfSell");
                }
                tx.taker_gets.check(signer)?;
                tx.taker_pays.check(signer)?;
            }
            Self::OfferCancel(tx) => {
                if tx.flags != FLAGS_NONE {
                    return Err("OfferCancel Flags must be 0");
                }
            }
            Self::Payment(tx) => {
                if tx.flags != FLAGS_NONE {
                    return Err("Payment Flags must be 0");
                }
                if !signer.is_valid_address(&tx.destination) {
                    return Err("Destination is not a valid address");
                }
                tx.amount.check(signer)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SequencedTransaction
// ---------------------------------------------------------------------------

/// A record paired with the sequence number it will be signed under.
///
/// This is the "record plus `Sequence`" the signer sees. The underlying
/// record is borrowed and never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencedTransaction<'a> {
    pub record: &'a TransactionRecord,
    pub sequence: u32,
}

impl<'a> SequencedTransaction<'a> {
    pub fn new(record: &'a TransactionRecord, sequence: u32) -> Self {
        Self { record, sequence }
    }

    /// All wire fields, including `TransactionType` and `Sequence`, in a
    /// sorted map. Serializing the map yields canonical JSON.
    pub fn fields(&self) -> Result<BTreeMap<String, Value>, serde_json::Error> {
        let mut fields = match serde_json::to_value(self.record)? {
            Value::Object(map) => map.into_iter().collect::<BTreeMap<_, _>>(),
            _ => {
                return Err(serde::ser::Error::custom(
                    "record did not serialize to an object",
                ))
            }
        };
        fields.insert("Sequence".to_string(), Value::from(self.sequence));
        Ok(fields)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
