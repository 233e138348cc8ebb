//! # Inclusion Path Verification
//!
//! Recomputes the trie root from an inclusion path and decides whether the
//! path proves presence or absence of its key.
//!
//! # Algorithm
//!
//! 1. Hash the two children of the deepest step into their parent digest
//! 2. Walk up: the child of the step above that lies on the key's path must
//!    be an interior node hashing to that parent digest
//! 3. Hash that step's children into the next parent digest
//! 4. The digest produced from step 0 is the root
//!
//! # Time Complexity: O(depth)
//! # Space Complexity: O(1)

use super::hash_path::{hash_interior, hash_node, key_path, path_direction, shares_prefix};
use crate::domain::{
    invariant_path_depth, Hash, InclusionPath, LeafEntry, Membership, ProofError, Step, TrieNode,
    MAX_PATH_DEPTH,
};
use tracing::trace;

/// Recompute the root digest committed to by `path`.
///
/// # Errors
/// - `MalformedProof` if the path is empty, deeper than `max_depth` (never
///   more than `MAX_PATH_DEPTH`), or leaves the key's path through a
///   non-interior node
/// - `RootMismatch` if an interior node on the path does not hash to the
///   digest recomputed from the step below it
pub fn recompute_root(path: &InclusionPath, max_depth: usize) -> Result<Hash, ProofError> {
    invariant_path_depth(path.steps.len(), max_depth.min(MAX_PATH_DEPTH))?;

    let key_bits = key_path(&path.key);
    let last = path.steps.len() - 1;
    let mut digest = step_digest(&path.steps[last]);

    for depth in (0..last).rev() {
        let on_path = path.steps[depth].child(path_direction(&key_bits, depth));
        let TrieNode::Interior { .. } = on_path else {
            return Err(ProofError::MalformedProof(format!(
                "node on key path at depth {} is not interior",
                depth
            )));
        };

        let referenced = hash_node(on_path);
        if referenced != digest {
            trace!(depth, "inclusion path digest mismatch");
            return Err(ProofError::RootMismatch {
                expected: referenced,
                actual: digest,
            });
        }
        digest = step_digest(&path.steps[depth]);
    }

    Ok(digest)
}

/// Digest of the interior node whose children are `step`.
fn step_digest(step: &Step) -> Hash {
    hash_interior(&hash_node(&step.left), &hash_node(&step.right))
}

/// True iff a child of the final step is a leaf stored under `key`.
pub fn matches(path: &InclusionPath, key: &[u8]) -> bool {
    get(path, key).is_some()
}

/// Leaf of the final step stored under `key`, on either side.
pub fn get<'a>(path: &'a InclusionPath, key: &[u8]) -> Option<LeafEntry<'a>> {
    let step = path.last_step()?;
    [&step.left, &step.right]
        .into_iter()
        .find_map(|node| match node {
            TrieNode::Leaf { key: k, values } if k.as_slice() == key => {
                Some(LeafEntry::new(k, values))
            }
            _ => None,
        })
}

/// Leaf for the path's own key, if the final step holds it.
pub fn matching_leaf(path: &InclusionPath) -> Option<LeafEntry<'_>> {
    get(path, &path.key)
}

/// Decide whether `path` proves presence or absence of its key.
///
/// Let `d` be the depth of the final step and `n` its child on the key's
/// side. The key is present if `n` is a leaf holding it. The key is absent
/// if `n` is empty, or if `n` is a leaf for another key whose path agrees
/// with the queried path on bits `0..=d`: that leaf is the queried key's
/// neighbour, and no other key with this prefix can exist below it.
///
/// # Errors
/// - `MalformedProof` for a path that is empty or deeper than the key path
///   has bits, and for every other shape, including a leaf for the queried
///   key on the wrong side and a neighbour off the key's prefix
pub fn resolve_membership(path: &InclusionPath) -> Result<Membership<'_>, ProofError> {
    invariant_path_depth(path.steps.len(), MAX_PATH_DEPTH)?;
    let Some(step) = path.last_step() else {
        return Err(ProofError::MalformedProof("inclusion path has no steps".into()));
    };
    let depth = path.steps.len() - 1;
    let key_bits = key_path(&path.key);
    let direction = path_direction(&key_bits, depth);

    if step.child(direction.sibling()).leaf_key() == Some(path.key.as_slice()) {
        return Err(ProofError::MalformedProof(
            "queried key sits off its own path".into(),
        ));
    }

    match step.child(direction) {
        TrieNode::Leaf { key, values } if *key == path.key => {
            Ok(Membership::Present(LeafEntry::new(key, values)))
        }
        TrieNode::Empty => Ok(Membership::Absent),
        TrieNode::Leaf { key, .. } => {
            if shares_prefix(&key_path(key), &key_bits, depth) {
                Ok(Membership::Absent)
            } else {
                Err(ProofError::MalformedProof(format!(
                    "exclusion neighbour {} does not share the queried prefix at depth {}",
                    hex::encode(key),
                    depth
                )))
            }
        }
        TrieNode::Interior { .. } => Err(ProofError::MalformedProof(format!(
            "path stops at an interior node at depth {}",
            depth
        ))),
    }
}
