//! # Adapters Layer (Hexagonal Architecture)
//!
//! Wire codec and the BLS implementation of the signature port.

mod bls_verifier;
mod wire;

pub use bls_verifier::BlsRosterVerifier;
pub use wire::{decode_proof, encode_proof};
