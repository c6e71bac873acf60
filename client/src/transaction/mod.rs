//! # Transaction Module
//!
//! Records, validation and batch signing for the transaction pool.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      — Shared value types (TransactionKind, TokenAmount, Amount, Memo)
//! record.rs     — The closed TransactionRecord sum type and SequencedTransaction
//! validation.rs — Whole-list validation of typed and raw records
//! signing.rs    — sign_batch and the BatchSubmissionPayload it produces
//! ```
//!
//! ## Batch Lifecycle
//!
//! 1. **Validate** — [`validate_tx_list`] (or [`validate_tx_list_values`] for raw JSON).
//! 2. **Reserve** — the pool client reserves one sequence per record.
//! 3. **Sign** — [`sign_batch`] signs each record under its sequence, in order.
//! 4. **Submit** — the [`BatchSubmissionPayload`] goes to the pool service.
//!
//! ## Design Decisions
//!
//! - Records are never mutated. The sequence travels beside the record in a
//!   [`SequencedTransaction`] and is merged only into the signed bytes.
//! - `Fee` is held as a [`serde_json::Number`], so the signed bytes carry the
//!   number the caller wrote: `10` stays `10`, `0.00001` stays `0.00001`.
//! - One bad record rejects the whole batch; partial signing never happens.

pub mod record;
pub mod signing;
pub mod types;
pub mod validation;

pub use record::{OfferCancel, OfferCreate, Payment, SequencedTransaction, TransactionRecord};
pub use signing::{
    serialize_batch, sign_batch, sign_raw_batch, BatchSubmissionPayload, SignedTransaction,
};
pub use types::{Amount, Memo, MemoFields, TokenAmount, TransactionKind};
pub use validation::{validate_tx_list, validate_tx_list_values};
