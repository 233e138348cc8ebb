//! # Inbound Ports
//!
//! API trait defining what the proof verifier offers its callers.

use crate::domain::{AnchorBlock, LedgerInstance, ProofError, ProofOutcome};

/// Proof verification API - inbound port.
///
/// Every method takes the raw encoded proof and the caller's trusted
/// anchor. Nothing is accepted unless the full chain of checks passes.
pub trait ProofVerificationApi: Send + Sync {
    /// Decode and fully verify a proof, reporting presence or absence of
    /// its key.
    fn verify_bytes(&self, bytes: &[u8], anchor: &AnchorBlock)
        -> Result<ProofOutcome, ProofError>;

    /// Verified ledger instance stored under the proof's key.
    ///
    /// # Errors
    /// - `NotFound` if the proof verifies but shows the key absent
    fn get_instance(&self, bytes: &[u8], anchor: &AnchorBlock)
        -> Result<LedgerInstance, ProofError>;

    /// True iff the proof verifies and shows an instance of `contract_id`.
    fn is_contract_instance(&self, bytes: &[u8], contract_id: &str, anchor: &AnchorBlock)
        -> bool;
}
