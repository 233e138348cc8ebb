//! # Domain Invariants
//!
//! Rules every accepted proof satisfies, plus the constants they use.

use super::entities::Roster;
use super::errors::{Hash, ProofError};

/// Maximum inclusion path depth: one step per bit of the key path digest.
pub const MAX_PATH_DEPTH: usize = 256;

/// Value arity of a ledger instance: `[value, contract id, access-control id]`.
pub const LEDGER_INSTANCE_ARITY: usize = 3;

/// Default upper bound on forward links in one proof.
pub const DEFAULT_MAX_FORWARD_LINKS: usize = 100_000;

/// Digest domain tag of an empty trie child.
pub const EMPTY_NODE_TAG: u8 = 0x00;
/// Digest domain tag of a trie leaf.
pub const LEAF_NODE_TAG: u8 = 0x01;
/// Digest domain tag of an interior trie node.
pub const INTERIOR_NODE_TAG: u8 = 0x02;
/// Digest domain tag of a roster id.
pub const ROSTER_ID_TAG: u8 = 0x10;
/// Digest domain tag of a block id.
pub const BLOCK_ID_TAG: u8 = 0x11;
/// Digest domain tag of a forward-link message.
pub const LINK_MESSAGE_TAG: u8 = 0x12;

/// Minimum number of roster members that must co-sign a link.
///
/// Tolerates `f = (n - 1) / 3` faulty members out of `n`.
pub fn byzantine_threshold(roster_len: usize) -> usize {
    if roster_len == 0 {
        return 0;
    }
    roster_len - (roster_len - 1) / 3
}

/// Invariant: an inclusion path has at least one and at most `max` steps.
pub fn invariant_path_depth(depth: usize, max: usize) -> Result<(), ProofError> {
    if depth == 0 {
        return Err(ProofError::MalformedProof("inclusion path has no steps".into()));
    }
    if depth > max {
        return Err(ProofError::MalformedProof(format!(
            "inclusion path too deep: {} > {}",
            depth, max
        )));
    }
    Ok(())
}

/// Invariant: link `index` starts where the chain currently ends.
pub fn invariant_link_contiguous(
    index: usize,
    expected_from: &Hash,
    from: &Hash,
) -> Result<(), ProofError> {
    if from != expected_from {
        return Err(ProofError::ChainVerification(format!(
            "link {} starts at {}, expected {}",
            index,
            hex::encode(from),
            hex::encode(expected_from)
        )));
    }
    Ok(())
}

/// Invariant: the chain ends at the latest block.
pub fn invariant_chain_terminus(reached: &Hash, latest: &Hash) -> Result<(), ProofError> {
    if reached != latest {
        return Err(ProofError::ChainVerification(format!(
            "chain ends at {}, latest block is {}",
            hex::encode(reached),
            hex::encode(latest)
        )));
    }
    Ok(())
}

/// Invariant: the roster reached by the chain is the latest block's roster.
pub fn invariant_roster_continuity(reached: &Roster, declared: &Roster) -> Result<(), ProofError> {
    if reached != declared {
        return Err(ProofError::ChainVerification(format!(
            "roster {} reached by the chain differs from latest block roster {}",
            hex::encode(reached.id()),
            hex::encode(declared.id())
        )));
    }
    Ok(())
}
