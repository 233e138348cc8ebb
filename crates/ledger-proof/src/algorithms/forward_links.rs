//! # Forward-Link Chain
//!
//! Checks that a run of signed forward links connects a trusted anchor to
//! the latest block, following roster changes along the way.
//!
//! # Checks
//! 1. The latest header's id commits to its contents
//! 2. Each link starts where the previous one ended
//! 3. Each link is signed by the roster in effect at its source
//! 4. A link carrying a new roster hands signing over to that roster
//! 5. The last link ends at the latest block
//! 6. Optionally, the roster reached equals the latest header's roster

use crate::domain::{
    invariant_chain_terminus, invariant_link_contiguous, invariant_roster_continuity,
    AnchorBlock, BlockHeader, ForwardLink, Hash, ProofError, Roster,
};
use crate::ports::CollectiveSignatureVerifier;
use tracing::{debug, trace};

/// Limits applied while walking a chain.
#[derive(Clone, Copy, Debug)]
pub struct ChainLimits {
    /// Upper bound on the number of links.
    pub max_links: usize,
    /// Require the final roster to equal the latest header's roster.
    pub require_roster_continuity: bool,
}

/// Verify that `links` lead from `anchor` to `latest`.
///
/// An empty chain is accepted only when the anchor is the latest block.
///
/// # Errors
/// - `MalformedProof` if there are more than `limits.max_links` links
/// - `ChainVerification` for every broken chain rule
pub fn verify_forward_links<V>(
    anchor: &AnchorBlock,
    links: &[ForwardLink],
    latest: &BlockHeader,
    verifier: &V,
    limits: ChainLimits,
) -> Result<(), ProofError>
where
    V: CollectiveSignatureVerifier + ?Sized,
{
    if links.len() > limits.max_links {
        return Err(ProofError::MalformedProof(format!(
            "{} forward links exceed the limit of {}",
            links.len(),
            limits.max_links
        )));
    }

    if !latest.is_sealed() {
        return Err(ProofError::ChainVerification(format!(
            "latest block id {} does not match its header",
            hex::encode(latest.block_id)
        )));
    }

    let (reached, roster) = links.iter().enumerate().try_fold(
        (anchor.block_id, &anchor.roster),
        |(expected_from, roster), (index, link)| {
            follow_link(index, expected_from, roster, link, verifier)
        },
    )?;

    invariant_chain_terminus(&reached, &latest.block_id)?;
    if limits.require_roster_continuity {
        invariant_roster_continuity(roster, &latest.roster)?;
    }

    debug!(
        links = links.len(),
        latest_index = latest.index,
        "forward-link chain verified"
    );
    Ok(())
}

/// Check one link against the chain so far and return the new chain end.
fn follow_link<'a, V>(
    index: usize,
    expected_from: Hash,
    roster: &'a Roster,
    link: &'a ForwardLink,
    verifier: &V,
) -> Result<(Hash, &'a Roster), ProofError>
where
    V: CollectiveSignatureVerifier + ?Sized,
{
    invariant_link_contiguous(index, &expected_from, &link.from)?;

    verifier
        .verify(&link.message(), &link.signature, roster)
        .map_err(|e| {
            ProofError::ChainVerification(format!("link {} signature rejected: {}", index, e))
        })?;

    trace!(
        index,
        signers = link.signature.participant_count(),
        rotates = link.new_roster.is_some(),
        "forward link accepted"
    );

    Ok((link.to, link.new_roster.as_ref().unwrap_or(roster)))
}
