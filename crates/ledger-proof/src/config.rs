//! # Proof Verifier Configuration
//!
//! Limits and policy switches for decoding and verifying proofs.

use crate::algorithms::ChainLimits;
use crate::domain::{DEFAULT_MAX_FORWARD_LINKS, MAX_PATH_DEPTH};
use serde::{Deserialize, Serialize};

/// Default decode limit: 4 MiB.
pub const DEFAULT_MAX_PROOF_BYTES: u64 = 4 * 1024 * 1024;

/// Proof verifier configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofVerifierConfig {
    /// Largest encoded proof the decoder accepts.
    pub max_proof_bytes: u64,

    /// Maximum number of steps in an inclusion path. Values above
    /// `MAX_PATH_DEPTH` are capped to it.
    pub max_path_depth: usize,

    /// Maximum number of forward links in one proof.
    pub max_forward_links: usize,

    /// Number of (anchor, latest block) pairs remembered as chain-verified.
    pub verified_chain_cache_size: usize,

    /// Require the roster reached by the chain to equal the latest
    /// header's roster.
    pub require_roster_continuity: bool,
}

impl Default for ProofVerifierConfig {
    fn default() -> Self {
        Self {
            max_proof_bytes: DEFAULT_MAX_PROOF_BYTES,
            max_path_depth: MAX_PATH_DEPTH,
            max_forward_links: DEFAULT_MAX_FORWARD_LINKS,
            verified_chain_cache_size: 1000,
            require_roster_continuity: true,
        }
    }
}

impl ProofVerifierConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            max_proof_bytes: 64 * 1024,
            max_path_depth: MAX_PATH_DEPTH,
            max_forward_links: 64,
            verified_chain_cache_size: 8,
            require_roster_continuity: true,
        }
    }

    /// Chain limits derived from this config.
    pub fn chain_limits(&self) -> ChainLimits {
        ChainLimits {
            max_links: self.max_forward_links,
            require_roster_continuity: self.require_roster_continuity,
        }
    }
}
