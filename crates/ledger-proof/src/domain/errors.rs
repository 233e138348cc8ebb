//! # Domain Errors
//!
//! One tagged error type for every way a proof can be rejected.

use thiserror::Error;

/// Hash type alias (32-byte SHA-256)
pub type Hash = [u8; 32];

/// Proof verification error kinds.
///
/// Every variant is final: the verifier never retries or repairs a proof.
/// The caller decides whether to refetch, switch anchors, or give up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofError {
    /// Malformed bytes or wire structure.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Structurally valid but logically incomplete proof.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// A recomputed digest differs from the digest it must match.
    #[error("Root mismatch: expected {}, got {}", hex::encode(.expected), hex::encode(.actual))]
    RootMismatch {
        /// Digest declared by the header or by the step above
        expected: Hash,
        /// Digest recomputed from the path
        actual: Hash,
    },

    /// Broken forward-link linkage or invalid roster signature.
    #[error("Chain verification failed: {0}")]
    ChainVerification(String),

    /// The queried key is provably absent.
    #[error("Key not found: {}", hex::encode(.0))]
    NotFound(Vec<u8>),
}

impl ProofError {
    /// True for the absence outcome, which is a verified result rather
    /// than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProofError::NotFound(_))
    }
}

impl From<bincode::Error> for ProofError {
    fn from(err: bincode::Error) -> Self {
        ProofError::Decode(err.to_string())
    }
}
