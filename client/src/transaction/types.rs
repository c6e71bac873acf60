//! Value types shared by the transaction variants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::SigningCapability;

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// The `TransactionType` tag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Place an offer on the order book.
    OfferCreate,
    /// Withdraw a previously placed offer, identified by its sequence.
    OfferCancel,
    /// Move value to another account.
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OfferCreate => write!(f, "OfferCreate"),
            Self::OfferCancel => write!(f, "OfferCancel"),
            Self::Payment => write!(f, "Payment"),
        }
    }
}

// ---------------------------------------------------------------------------
// TokenAmount
// ---------------------------------------------------------------------------

/// An amount of an issued token, e.g.
/// `{"value": "1.5", "currency": "CNY", "issuer": "jGa9J9..."}`.
///
/// `value` stays a decimal string as received; the ledger defines its
/// precision, not this client. An empty `issuer` denotes the native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub value: String,
    pub currency: String,
    pub issuer: String,
}

impl TokenAmount {
    pub fn new(
        value: impl Into<String>,
        currency: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
            issuer: issuer.into(),
        }
    }

    /// Structural check: numeric value, non-empty currency code, issuer empty
    /// or a valid address.
    pub fn check<S: SigningCapability + ?Sized>(&self, signer: &S) -> Result<(), &'static str> {
        if !is_numeric_string(&self.value) {
            return Err("token value is not numeric");
        }
        if self.currency.is_empty() || !self.currency.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err("token currency is malformed");
        }
        if !self.issuer.is_empty() && !signer.is_valid_address(&self.issuer) {
            return Err("token issuer is not a valid address");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A `Payment` amount: either a native-currency numeric string or a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Native(String),
    Token(TokenAmount),
}

impl Amount {
    pub fn check<S: SigningCapability + ?Sized>(&self, signer: &S) -> Result<(), &'static str> {
        match self {
            Self::Native(value) if is_numeric_string(value) => Ok(()),
            Self::Native(_) => Err("native amount is not numeric"),
            Self::Token(token) => token.check(signer),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(value) => write!(f, "{}", value),
            Self::Token(t) => write!(f, "{} {}", t.value, t.currency),
        }
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// One entry of `Memos`, wrapped the way the ledger expects:
/// `{"Memo": {"MemoType": "..", "MemoData": ".."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    #[serde(rename = "Memo")]
    pub memo: MemoFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

impl Memo {
    /// Text memo with a `string` type tag.
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            memo: MemoFields {
                memo_type: Some("string".to_string()),
                memo_data: Some(data.into()),
                memo_format: None,
            },
        }
    }
}

/// `true` for an optionally signed decimal like `"10"`, `"-0.5"` or `"1e-6"`.
/// The parse is only a shape check; the value itself is passed on verbatim.
pub fn is_numeric_string(s: &str) -> bool {
    !s.is_empty() && s.trim() == s && s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
