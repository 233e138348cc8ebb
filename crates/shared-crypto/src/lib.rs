//! # Shared Crypto - Proof Verification Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Trie node digests, block ids, link messages |
//! | `bls` | BLS12-381 (min_pk) | Collective roster signatures on forward links |
//!
//! ## Security Properties
//!
//! - **SHA-256**: every digest used by the verifier starts with a one-byte
//!   domain tag, so digests of different structures never collide by layout
//! - **BLS**: public keys are subgroup-checked on parse, signatures are
//!   validated before aggregate verification

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod errors;
pub mod hashing;

// Re-exports
pub use bls::{verify_aggregate, BlsKeyPair, BlsPublicKey, BlsSignature};
pub use errors::CryptoError;
pub use hashing::{sha256, tagged_hash, Hash, Sha256Hasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
