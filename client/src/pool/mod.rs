//! # Pool Service
//!
//! Async access to the transaction pool service: sequence reservation,
//! batch submission, submitted-record queries and cancellation.
//!
//! ```text
//! transport.rs — Transport trait, PoolRequest, reqwest-backed HttpTransport
//! envelope.rs  — {code, msg, data} response envelope
//! types.rs     — FromChain, TxState, QueryScope, SubmittedRecord
//! client.rs    — PoolClient operations and composite flows
//! ```
//!
//! | Operation           | Method | Path                    | Parameters                  |
//! |---------------------|--------|-------------------------|-----------------------------|
//! | `reserve_sequences` | GET    | `/sequences/{pubkey}`   | `signedAddr, fromChain, count` |
//! | `submit`            | POST   | `/submit/{pubkey}`      | `{dataHashSign, dataJsonStr}` |
//! | `fetch_submitted`   | GET    | `/submitted/{pubkey}`   | `state, count`              |
//! | `cancel_unchained`  | POST   | `/cancel/{pubkey}`      | `{signedAddr}`              |

pub mod client;
pub mod envelope;
pub mod transport;
pub mod types;

pub use client::PoolClient;
pub use envelope::{ResponseCode, ResponseEnvelope};
pub use transport::{HttpTransport, Method, PoolRequest, Transport};
pub use types::{FromChain, QueryScope, SubmittedRecord, TxState};
