//! # Node Digests
//!
//! Domain-separated SHA-256 digests of trie nodes and key paths.
//!
//! ```text
//! Empty    = H(0x00)
//! Leaf     = H(0x01 || len(key) || key || count(values) || len(v0) || v0 || ...)
//! Interior = H(0x02 || left || right)
//! ```
//!
//! Lengths are little-endian u64. Digests are fixed 32-byte arrays, so a
//! hash of the wrong length never reaches this module: the decoder
//! rejects it first.

use crate::domain::{
    Direction, Hash, TrieNode, EMPTY_NODE_TAG, INTERIOR_NODE_TAG, LEAF_NODE_TAG,
};
use shared_crypto::{sha256, tagged_hash, Sha256Hasher};

/// Digest of any trie node.
pub fn hash_node(node: &TrieNode) -> Hash {
    match node {
        TrieNode::Empty => hash_empty(),
        TrieNode::Leaf { key, values } => hash_leaf(key, values),
        TrieNode::Interior { left, right } => hash_interior(left, right),
    }
}

/// Digest of an empty child.
pub fn hash_empty() -> Hash {
    tagged_hash(EMPTY_NODE_TAG, &[])
}

/// Digest of a leaf.
pub fn hash_leaf(key: &[u8], values: &[Vec<u8>]) -> Hash {
    let mut hasher = Sha256Hasher::with_tag(LEAF_NODE_TAG);
    hasher.update_prefixed(key).update_len(values.len());
    for value in values {
        hasher.update_prefixed(value);
    }
    hasher.finalize()
}

/// Digest of an interior node from its children's digests.
pub fn hash_interior(left: &Hash, right: &Hash) -> Hash {
    tagged_hash(INTERIOR_NODE_TAG, &[left.as_slice(), right.as_slice()])
}

/// Path of a key through the trie.
pub fn key_path(key: &[u8]) -> Hash {
    sha256(key)
}

/// Direction taken at `depth` along `path` (most-significant bit first).
pub fn path_direction(path: &Hash, depth: usize) -> Direction {
    let byte = path[depth / 8];
    if (byte >> (7 - depth % 8)) & 1 == 0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// True if `a` and `b` take the same direction at every depth `0..=depth`.
pub fn shares_prefix(a: &Hash, b: &Hash, depth: usize) -> bool {
    (0..=depth).all(|d| path_direction(a, d) == path_direction(b, d))
}
