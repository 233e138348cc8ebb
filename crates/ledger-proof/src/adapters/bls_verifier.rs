//! # BLS Roster Verifier
//!
//! Checks collective signatures as BLS12-381 aggregates over the roster
//! members flagged in the participation mask.

use crate::domain::{byzantine_threshold, CollectiveSignature, Roster};
use crate::ports::CollectiveSignatureVerifier;
use shared_crypto::{verify_aggregate, BlsPublicKey, BlsSignature, CryptoError};
use tracing::trace;

/// Collective signature verifier backed by `blst`.
///
/// A signature is valid when its mask covers the whole roster, at least
/// `byzantine_threshold(roster.len())` members participate, and the
/// aggregate verifies against exactly those members' keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlsRosterVerifier;

impl BlsRosterVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }
}

impl CollectiveSignatureVerifier for BlsRosterVerifier {
    fn verify(
        &self,
        message: &[u8],
        signature: &CollectiveSignature,
        roster: &Roster,
    ) -> Result<(), CryptoError> {
        if roster.is_empty() {
            return Err(CryptoError::InvalidInput("empty roster".into()));
        }
        if signature.participants.len() != roster.len() {
            return Err(CryptoError::InvalidInput(format!(
                "participation mask covers {} members, roster has {}",
                signature.participants.len(),
                roster.len()
            )));
        }

        let required = byzantine_threshold(roster.len());
        let got = signature.participant_count();
        if got < required {
            return Err(CryptoError::InsufficientSigners { got, required });
        }

        let signers = roster
            .keys
            .iter()
            .zip(&signature.participants)
            .filter(|(_, participated)| **participated)
            .map(|(key, _)| BlsPublicKey::from_bytes(key.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        let aggregate = BlsSignature::from_bytes(&signature.aggregate)?;

        trace!(signers = got, roster = roster.len(), "verifying aggregate");
        verify_aggregate(message, &aggregate, &signers)
    }
}
