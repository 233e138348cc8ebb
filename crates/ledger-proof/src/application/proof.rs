//! # Proof
//!
//! A decoded proof and the state machine that verifies it.
//!
//! ```text
//! Decoded ──structure + root──▶ RootVerified ──links──▶ ChainVerified ──▶ Accepted
//!    │                              │                        │
//!    └──────────────────────────────┴────────────────────────┴──▶ Rejected(ProofError)
//! ```
//!
//! Accessors read the claimed entry without verifying anything. Callers
//! must check `verify` before acting on what they read.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::adapters::{decode_proof, encode_proof, BlsRosterVerifier};
use crate::algorithms::{self, verify_forward_links};
use crate::config::ProofVerifierConfig;
use crate::domain::{
    AccessControlId, AnchorBlock, BlockHeader, ForwardLink, Hash, InclusionPath, LeafEntry,
    LedgerInstance, Membership, ProofError, ProofState,
};
use crate::ports::CollectiveSignatureVerifier;

/// A ledger state proof: an inclusion path, the block header committing to
/// its root, and the forward links leading to that block.
///
/// Immutable once built. The recomputed root is memoized, so a proof can
/// be shared and verified from many threads.
#[derive(Debug)]
pub struct Proof {
    path: InclusionPath,
    latest: BlockHeader,
    links: Vec<ForwardLink>,
    config: ProofVerifierConfig,
    root: OnceLock<Result<Hash, ProofError>>,
}

impl Proof {
    /// Assemble a proof from decoded records with the default config.
    pub fn new(path: InclusionPath, latest: BlockHeader, links: Vec<ForwardLink>) -> Self {
        Self {
            path,
            latest,
            links,
            config: ProofVerifierConfig::default(),
            root: OnceLock::new(),
        }
    }

    /// Replace the limits this proof is verified under.
    pub fn with_config(self, config: ProofVerifierConfig) -> Self {
        Self {
            config,
            root: OnceLock::new(),
            ..self
        }
    }

    /// Decode a proof from wire bytes.
    pub fn from_bytes(bytes: &[u8], config: &ProofVerifierConfig) -> Result<Self, ProofError> {
        Ok(decode_proof(bytes, config)?.with_config(config.clone()))
    }

    /// Encode this proof into wire bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProofError> {
        encode_proof(self)
    }

    /// The inclusion path.
    pub fn inclusion_path(&self) -> &InclusionPath {
        &self.path
    }

    /// The latest block header, whose root the path must reach.
    pub fn latest(&self) -> &BlockHeader {
        &self.latest
    }

    /// Forward links from the anchor to the latest block.
    pub fn links(&self) -> &[ForwardLink] {
        &self.links
    }

    /// Key the proof is about.
    pub fn key(&self) -> &[u8] {
        &self.path.key
    }

    /// Config this proof is verified under.
    pub fn config(&self) -> &ProofVerifierConfig {
        &self.config
    }

    /// Root digest recomputed from the inclusion path (memoized).
    pub fn recompute_root(&self) -> Result<Hash, ProofError> {
        self.root
            .get_or_init(|| algorithms::recompute_root(&self.path, self.config.max_path_depth))
            .clone()
    }

    /// True iff a child of the final step is a leaf stored under `key`.
    pub fn matches(&self, key: &[u8]) -> bool {
        algorithms::matches(&self.path, key)
    }

    /// Presence or absence of the proof's key, judged from the final step.
    pub fn membership(&self) -> Result<Membership<'_>, ProofError> {
        algorithms::resolve_membership(&self.path)
    }

    /// Claimed entry for the proof's key.
    ///
    /// # Errors
    /// - `NotFound` if the proof is one of absence
    /// - `MalformedProof` if the final step is not a valid presence or
    ///   absence witness
    pub fn entry(&self) -> Result<LeafEntry<'_>, ProofError> {
        match self.membership()? {
            Membership::Present(entry) => Ok(entry),
            Membership::Absent => Err(ProofError::NotFound(self.path.key.clone())),
        }
    }

    /// Values stored under the proof's key.
    pub fn values(&self) -> Result<&[Vec<u8>], ProofError> {
        Ok(self.entry()?.values())
    }

    /// Stored state value.
    pub fn value(&self) -> Result<&[u8], ProofError> {
        self.entry()?.value()
    }

    /// Contract identifier of the stored instance.
    pub fn contract_id(&self) -> Result<&str, ProofError> {
        self.entry()?.contract_id()
    }

    /// Access-control identifier of the stored instance.
    pub fn access_control_id(&self) -> Result<AccessControlId, ProofError> {
        self.entry()?.access_control_id()
    }

    /// Typed instance of the final step's leaf stored under `key`, on
    /// either side.
    ///
    /// # Errors
    /// - `NotFound` if neither child of the final step holds `key`
    /// - `MalformedProof` if that leaf has fewer than three values
    pub fn get(&self, key: &[u8]) -> Result<LedgerInstance, ProofError> {
        algorithms::get(&self.path, key)
            .ok_or_else(|| ProofError::NotFound(key.to_vec()))?
            .to_instance()
    }

    /// True iff the proof's key matches and its leaf has exactly the three
    /// ledger instance fields.
    pub fn is_ledger_instance_proof(&self) -> bool {
        algorithms::matching_leaf(&self.path).map_or(false, |entry| entry.is_ledger_instance())
    }

    /// Key and typed fields of the proven instance.
    ///
    /// # Errors
    /// - `NotFound` for an absence proof
    /// - `MalformedProof` for an empty key or fewer than three values
    pub fn key_value(&self) -> Result<LedgerInstance, ProofError> {
        let entry = self.entry()?;
        if entry.key().is_empty() {
            return Err(ProofError::MalformedProof("entry has an empty key".into()));
        }
        entry.to_instance()
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Structural check: the final step is a valid presence or absence
    /// witness for the proof's key.
    pub fn verify_structure(&self) -> Result<(), ProofError> {
        self.membership().map(|_| ())
    }

    /// The recomputed root equals the latest header's root.
    pub fn verify_root(&self) -> Result<(), ProofError> {
        let actual = self.recompute_root()?;
        if actual != self.latest.root_hash {
            return Err(ProofError::RootMismatch {
                expected: self.latest.root_hash,
                actual,
            });
        }
        Ok(())
    }

    /// The forward links lead from `anchor` to the latest block.
    pub fn verify_chain<V>(&self, anchor: &AnchorBlock, verifier: &V) -> Result<(), ProofError>
    where
        V: CollectiveSignatureVerifier + ?Sized,
    {
        verify_forward_links(
            anchor,
            &self.links,
            &self.latest,
            verifier,
            self.config.chain_limits(),
        )
    }

    /// Run the state machine to a terminal state.
    pub fn evaluate<V>(&self, anchor: &AnchorBlock, verifier: &V) -> ProofState
    where
        V: CollectiveSignatureVerifier + ?Sized,
    {
        let mut state = ProofState::Decoded;
        loop {
            state = match state {
                ProofState::Decoded => self.advance(
                    self.verify_structure().and_then(|_| self.verify_root()),
                    ProofState::RootVerified,
                ),
                ProofState::RootVerified => {
                    self.advance(self.verify_chain(anchor, verifier), ProofState::ChainVerified)
                }
                ProofState::ChainVerified => ProofState::Accepted,
                terminal @ (ProofState::Accepted | ProofState::Rejected(_)) => {
                    if terminal.is_accepted() {
                        debug!(
                            key = %hex::encode(&self.path.key),
                            block_index = self.latest.index,
                            "proof accepted"
                        );
                    }
                    return terminal;
                }
            };
        }
    }

    fn advance(&self, outcome: Result<(), ProofError>, next: ProofState) -> ProofState {
        match outcome {
            Ok(()) => {
                trace!(state = ?next, "proof stage passed");
                next
            }
            Err(err) => {
                warn!(key = %hex::encode(&self.path.key), error = %err, "proof rejected");
                ProofState::Rejected(err)
            }
        }
    }

    /// Verify against `anchor` with a chosen signature verifier.
    pub fn verify_with<V>(&self, anchor: &AnchorBlock, verifier: &V) -> Result<(), ProofError>
    where
        V: CollectiveSignatureVerifier + ?Sized,
    {
        self.evaluate(anchor, verifier).into_result()
    }

    /// Verify against `anchor` with BLS roster signatures.
    pub fn verify(&self, anchor: &AnchorBlock) -> Result<(), ProofError> {
        self.verify_with(anchor, &BlsRosterVerifier::new())
    }

    /// `verify` as a boolean.
    pub fn is_valid(&self, anchor: &AnchorBlock) -> bool {
        self.verify(anchor).is_ok()
    }

    /// Verify, then return the proven entry.
    ///
    /// # Errors
    /// - `NotFound` if the proof verifies and shows the key absent
    /// - any verification error otherwise
    pub fn verify_entry<V>(
        &self,
        anchor: &AnchorBlock,
        verifier: &V,
    ) -> Result<LeafEntry<'_>, ProofError>
    where
        V: CollectiveSignatureVerifier + ?Sized,
    {
        self.verify_with(anchor, verifier)?;
        self.entry()
    }

    /// True iff the proof verifies against `anchor`, is a ledger instance
    /// proof, and the instance belongs to `expected_contract_id`.
    pub fn is_contract_instance(&self, expected_contract_id: &str, anchor: &AnchorBlock) -> bool {
        self.is_contract_instance_with(expected_contract_id, anchor, &BlsRosterVerifier::new())
    }

    /// `is_contract_instance` with a chosen signature verifier.
    pub fn is_contract_instance_with<V>(
        &self,
        expected_contract_id: &str,
        anchor: &AnchorBlock,
        verifier: &V,
    ) -> bool
    where
        V: CollectiveSignatureVerifier + ?Sized,
    {
        self.verify_with(anchor, verifier).is_ok()
            && self.is_ledger_instance_proof()
            && self.contract_id().map_or(false, |id| id == expected_contract_id)
    }

    /// Verify, check the contract, and decode the stored value as `T`.
    ///
    /// # Errors
    /// - `MalformedProof` if the instance belongs to another contract
    /// - `Decode` if the value is not a bincode encoding of `T`
    pub fn verify_and_decode<T: DeserializeOwned>(
        &self,
        contract_id: &str,
        anchor: &AnchorBlock,
    ) -> Result<T, ProofError> {
        let entry = self.verify_entry(anchor, &BlsRosterVerifier::new())?;
        let actual = entry.contract_id()?;
        if actual != contract_id {
            return Err(ProofError::MalformedProof(format!(
                "instance belongs to contract {:?}, expected {:?}",
                actual, contract_id
            )));
        }
        Ok(bincode::deserialize(entry.value()?)?)
    }
}
