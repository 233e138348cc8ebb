//! # Ledger Proof
//!
//! Verifies that a key/value entry belongs to the authenticated state of a
//! ledger at a given block, without trusting the server that supplied it.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A proof bundles:
//! - an inclusion path from a leaf (or its absence witness) up to a root hash
//! - the latest block header committing to that root
//! - signed forward links from a trusted anchor block to that header
//!
//! Verification recomputes the root, compares it with the header, then
//! walks the forward links from the anchor, following roster changes.
//!
//! ## Security Properties
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Domain-separated digests | Empty, leaf and interior nodes never collide |
//! | Exclusion hardening | Absence requires an empty slot or a prefix-sharing neighbour |
//! | Sealed headers | The latest block id must hash its own contents |
//! | Threshold signatures | Each link needs `n - (n-1)/3` roster members |
//! | Bounded decoding | Byte, depth, and link-count limits |
//!
//! ## Module Structure
//!
//! ```text
//! ledger-proof/
//! ├── domain/          # Records, errors, invariants, typed entry views
//! ├── algorithms/      # Node digests, inclusion paths, forward-link chains
//! ├── ports/           # API trait (inbound) + signature verifier (outbound)
//! ├── adapters/        # bincode wire codec, BLS roster verifier
//! ├── application/     # Proof state machine, ProofVerifierService
//! └── config.rs        # ProofVerifierConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{decode_proof, encode_proof, BlsRosterVerifier};
pub use algorithms::{
    hash_node, recompute_root, resolve_membership, verify_forward_links, ChainLimits,
};
pub use application::{Proof, ProofVerifierService};
pub use config::ProofVerifierConfig;
pub use domain::{
    byzantine_threshold, link_message, AccessControlId, AnchorBlock, BlockHeader,
    CollectiveSignature, Direction, ForwardLink, Hash, InclusionPath, LeafEntry, LedgerInstance,
    Membership, ProofError, ProofOutcome, ProofState, PublicKey, Roster, Step, TrieNode,
    LEDGER_INSTANCE_ARITY, MAX_PATH_DEPTH, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
pub use ports::{CollectiveSignatureVerifier, MockSignatureVerifier, ProofVerificationApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
