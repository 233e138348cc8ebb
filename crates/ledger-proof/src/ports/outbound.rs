//! # Outbound Ports
//!
//! Traits for the cryptography the verifier delegates to.

use crate::domain::{CollectiveSignature, Hash, Roster};
use shared_crypto::CryptoError;
use std::collections::HashSet;

/// Collective signature verification - outbound port.
///
/// Implementations decide whether `signature` is a valid collective
/// signature by `roster` over `message`, including any signer threshold.
pub trait CollectiveSignatureVerifier: Send + Sync {
    /// Verify a collective signature.
    fn verify(
        &self,
        message: &[u8],
        signature: &CollectiveSignature,
        roster: &Roster,
    ) -> Result<(), CryptoError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock signature verifier for testing chain logic without real keys.
#[derive(Clone, Debug, Default)]
pub struct MockSignatureVerifier {
    /// Accept only signatures checked against these roster ids (`None`: any).
    pub trusted_rosters: Option<HashSet<Hash>>,
    /// Messages whose signatures are always rejected.
    pub rejected_messages: HashSet<Hash>,
}

impl MockSignatureVerifier {
    /// Accept every signature.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Accept only signatures checked against the given roster.
    pub fn accepting_roster(roster_id: Hash) -> Self {
        Self {
            trusted_rosters: Some(HashSet::from([roster_id])),
            ..Self::default()
        }
    }

    /// Additionally trust another roster.
    pub fn and_roster(mut self, roster_id: Hash) -> Self {
        self.trusted_rosters
            .get_or_insert_with(HashSet::new)
            .insert(roster_id);
        self
    }

    /// Accept everything except signatures over `message`.
    pub fn rejecting_message(message: Hash) -> Self {
        Self {
            rejected_messages: HashSet::from([message]),
            ..Self::default()
        }
    }
}

impl CollectiveSignatureVerifier for MockSignatureVerifier {
    fn verify(
        &self,
        message: &[u8],
        _signature: &CollectiveSignature,
        roster: &Roster,
    ) -> Result<(), CryptoError> {
        if self.rejected_messages.iter().any(|m| m.as_slice() == message) {
            return Err(CryptoError::SignatureVerificationFailed);
        }
        match &self.trusted_rosters {
            Some(trusted) if !trusted.contains(&roster.id()) => {
                Err(CryptoError::SignatureVerificationFailed)
            }
            _ => Ok(()),
        }
    }
}
