//! # Cryptographic Primitives
//!
//! The client never touches a curve directly outside this module. The rest
//! of the crate talks to [`SigningCapability`]; [`Ed25519Signer`] is the
//! implementation shipped with the crate.
//!
//! - **hash** — ledger hashes plus the configurable integrity hash.
//! - **keys** — scoped key material and the base58check codec.
//! - **capability** — the signing trait the batch signer is generic over.
//! - **ed25519** — deterministic Ed25519 signer.

pub mod capability;
pub mod ed25519;
pub mod hash;
pub mod keys;

pub use capability::{SigningCapability, TransactionBlob};
pub use ed25519::Ed25519Signer;
pub use hash::HashAlgorithm;
pub use keys::{KeyError, KeyPair, PrivateKey};
