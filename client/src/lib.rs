// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txpool-client
//!
//! Client library for a transaction pool service that sits in front of a
//! ledger. An application hands it a batch of heterogeneous transactions
//! and an account secret; the client reserves sequence numbers from the
//! pool, signs every transaction under its sequence, binds the batch with an
//! integrity signature and submits it. It can also query submitted records
//! and cancel whatever has not reached the chain.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants and [`PoolConfig`].
//! - **error** — [`PoolError`] and its fixed precondition messages.
//! - **logging** — Optional `tracing` subscriber setup.
//! - **crypto** — Hashes, key material, the [`SigningCapability`] seam and
//!   the bundled [`Ed25519Signer`].
//! - **transaction** — Records, validation and batch signing.
//! - **account** — Address, public key and address attestation from a secret.
//! - **pool** — Async [`PoolClient`] over a pluggable [`Transport`].
//!
//! ## Flow
//!
//! ```rust,no_run
//! use txpool_client::{Ed25519Signer, FromChain, PoolClient, PoolConfig, TransactionRecord};
//!
//! # async fn run(txs: Vec<TransactionRecord>, secret: &str) -> Result<(), txpool_client::PoolError> {
//! let config = PoolConfig::from_env()?;
//! let signer = Ed25519Signer::new(config.hash_algorithm);
//! let pool = PoolClient::http(config)?;
//!
//! let payload = pool.sign_and_submit(&signer, &txs, secret, FromChain::Pool).await?;
//! println!("submitted {} bytes", payload.serialized_batch.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! 1. Precondition failures never reach the network.
//! 2. Signed output preserves input order, one sequence per record.
//! 3. Derived private keys live only as long as the call that derived them.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod pool;
pub mod transaction;

pub use account::{get_address_public_key, Account, Credential};
pub use config::PoolConfig;
pub use crypto::{Ed25519Signer, HashAlgorithm, SigningCapability};
pub use error::{ErrorKind, PoolError};
pub use pool::{
    FromChain, HttpTransport, PoolClient, PoolRequest, QueryScope, ResponseEnvelope,
    SubmittedRecord, Transport, TxState,
};
pub use transaction::{
    sign_batch, sign_raw_batch, validate_tx_list, validate_tx_list_values,
    BatchSubmissionPayload, SignedTransaction, TransactionRecord,
};
