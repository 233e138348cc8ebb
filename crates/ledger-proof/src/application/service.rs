//! # Proof Verifier Service
//!
//! Application service that decodes raw proofs, verifies them, and reports
//! the proven instance or its absence.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

use crate::adapters::BlsRosterVerifier;
use crate::application::Proof;
use crate::config::ProofVerifierConfig;
use crate::domain::{AnchorBlock, Hash, LedgerInstance, Membership, ProofError, ProofOutcome};
use crate::ports::{CollectiveSignatureVerifier, ProofVerificationApi};

/// (anchor block id, anchor roster id, latest block id).
type ChainKey = (Hash, Hash, Hash);

/// Proof Verifier Service - verifies proofs against trusted anchors.
///
/// Chains already verified from an anchor to a block are remembered, so
/// later proofs against the same block only pay for the inclusion path.
pub struct ProofVerifierService<V: CollectiveSignatureVerifier = BlsRosterVerifier> {
    /// Configuration.
    config: ProofVerifierConfig,
    /// Signature verifier for forward links.
    verifier: V,
    /// Chain-verified (anchor, latest block) pairs.
    verified_chains: Mutex<LruCache<ChainKey, ()>>,
}

impl ProofVerifierService<BlsRosterVerifier> {
    /// Create a service verifying BLS roster signatures.
    pub fn new(config: ProofVerifierConfig) -> Self {
        Self::with_verifier(config, BlsRosterVerifier::new())
    }
}

impl<V: CollectiveSignatureVerifier> ProofVerifierService<V> {
    /// Create a service with a chosen signature verifier.
    pub fn with_verifier(config: ProofVerifierConfig, verifier: V) -> Self {
        let cache_size =
            NonZeroUsize::new(config.verified_chain_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            verifier,
            verified_chains: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ProofVerifierConfig {
        &self.config
    }

    /// Number of remembered chain-verified pairs.
    pub fn cached_chains(&self) -> usize {
        self.verified_chains.lock().len()
    }

    /// Forget every remembered chain.
    pub fn clear_cache(&self) {
        self.verified_chains.lock().clear();
    }

    /// Decode `bytes` under the configured limits.
    pub fn decode(&self, bytes: &[u8]) -> Result<Proof, ProofError> {
        Proof::from_bytes(bytes, &self.config)
    }

    /// Verify a decoded proof, reusing a remembered chain when possible.
    pub fn verify_proof(&self, proof: &Proof, anchor: &AnchorBlock) -> Result<(), ProofError> {
        proof.verify_structure()?;
        proof.verify_root()?;

        let key = (anchor.block_id, anchor.roster.id(), proof.latest().block_id);
        // The cached pair only vouches for the declared id, so the header
        // must still hash to it.
        if proof.latest().is_sealed() && self.verified_chains.lock().get(&key).is_some() {
            trace!(block_index = proof.latest().index, "chain cache hit");
            return Ok(());
        }

        proof.verify_chain(anchor, &self.verifier)?;
        self.verified_chains.lock().put(key, ());
        debug!(
            block_index = proof.latest().index,
            links = proof.links().len(),
            "chain verified and cached"
        );
        Ok(())
    }

    /// Outcome of an already verified proof.
    fn outcome(proof: &Proof) -> Result<ProofOutcome, ProofError> {
        match proof.membership()? {
            Membership::Present(entry) => Ok(ProofOutcome::Present(entry.to_instance()?)),
            Membership::Absent => Ok(ProofOutcome::Absent {
                key: proof.key().to_vec(),
            }),
        }
    }
}

impl<V: CollectiveSignatureVerifier> ProofVerificationApi for ProofVerifierService<V> {
    fn verify_bytes(
        &self,
        bytes: &[u8],
        anchor: &AnchorBlock,
    ) -> Result<ProofOutcome, ProofError> {
        let proof = self.decode(bytes)?;
        self.verify_proof(&proof, anchor)?;
        Self::outcome(&proof)
    }

    fn get_instance(
        &self,
        bytes: &[u8],
        anchor: &AnchorBlock,
    ) -> Result<LedgerInstance, ProofError> {
        match self.verify_bytes(bytes, anchor)? {
            ProofOutcome::Present(instance) => Ok(instance),
            ProofOutcome::Absent { key } => Err(ProofError::NotFound(key)),
        }
    }

    fn is_contract_instance(&self, bytes: &[u8], contract_id: &str, anchor: &AnchorBlock) -> bool {
        let Ok(proof) = self.decode(bytes) else {
            return false;
        };
        self.verify_proof(&proof, anchor).is_ok()
            && proof.is_ledger_instance_proof()
            && proof.contract_id().map_or(false, |id| id == contract_id)
    }
}
