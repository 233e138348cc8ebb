//! # Domain Entities
//!
//! Plain immutable records a proof decodes into. Nothing here knows about
//! the wire format; the codec in `adapters::wire` is the only producer.

use super::errors::Hash;
use super::invariants::{BLOCK_ID_TAG, LINK_MESSAGE_TAG, ROSTER_ID_TAG};
use shared_crypto::Sha256Hasher;
use std::fmt;

/// Compressed BLS12-381 public key length.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Aggregate BLS signature length.
pub const SIGNATURE_LEN: usize = 96;

/// Which child of an interior node a key path descends into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Path bit 0.
    Left,
    /// Path bit 1.
    Right,
}

impl Direction {
    /// The other child.
    pub fn sibling(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A trie node as it appears inside an inclusion path step.
///
/// Leaves carry their full content so the verifier can read the entry;
/// interior nodes only carry their children's digests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    /// Placeholder for an absent child.
    Empty,
    /// Terminal key and its ordered value fields.
    Leaf {
        /// Stored key.
        key: Vec<u8>,
        /// Opaque value fields.
        values: Vec<Vec<u8>>,
    },
    /// Interior node referencing two children by digest.
    Interior {
        /// Digest of the left child.
        left: Hash,
        /// Digest of the right child.
        right: Hash,
    },
}

impl TrieNode {
    /// Key of a leaf node.
    pub fn leaf_key(&self) -> Option<&[u8]> {
        match self {
            TrieNode::Leaf { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// The two children of one interior node on a key's path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Left child.
    pub left: TrieNode,
    /// Right child.
    pub right: TrieNode,
}

impl Step {
    /// Create a step from its two children.
    pub fn new(left: TrieNode, right: TrieNode) -> Self {
        Self { left, right }
    }

    /// Child in the given direction.
    pub fn child(&self, direction: Direction) -> &TrieNode {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

/// Path of steps from the root (index 0) down to the node holding, or
/// standing in for, the queried key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionPath {
    /// Queried key.
    pub key: Vec<u8>,
    /// Steps from root toward the leaf.
    pub steps: Vec<Step>,
}

impl InclusionPath {
    /// Create an inclusion path.
    pub fn new(key: Vec<u8>, steps: Vec<Step>) -> Self {
        Self { key, steps }
    }

    /// Final (deepest) step.
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Number of steps.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

/// Compressed BLS public key of a roster member.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.0[..8]))
    }
}

/// Ordered set of public keys authorised to sign forward links.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    /// Member keys; the order defines signature participation bits.
    pub keys: Vec<PublicKey>,
}

impl Roster {
    /// Create a roster.
    pub fn new(keys: Vec<PublicKey>) -> Self {
        Self { keys }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the roster has no members.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Digest identifying this roster.
    pub fn id(&self) -> Hash {
        let mut hasher = Sha256Hasher::with_tag(ROSTER_ID_TAG);
        hasher.update_len(self.keys.len());
        for key in &self.keys {
            hasher.update(key.as_bytes());
        }
        hasher.finalize()
    }
}

/// Block header fields the verifier needs. Everything else the ledger puts
/// into a header travels in `data`, hashed but never interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Declared block id.
    pub block_id: Hash,
    /// Block height.
    pub index: u64,
    /// Root hash of the state trie after this block.
    pub root_hash: Hash,
    /// Roster responsible for this block.
    pub roster: Roster,
    /// Opaque remainder of the header.
    pub data: Vec<u8>,
}

impl BlockHeader {
    /// Create a header whose `block_id` is derived from its fields.
    pub fn new(index: u64, root_hash: Hash, roster: Roster, data: Vec<u8>) -> Self {
        let mut header = Self {
            block_id: [0u8; 32],
            index,
            root_hash,
            roster,
            data,
        };
        header.block_id = header.compute_id();
        header
    }

    /// Block id committed to by the header fields.
    pub fn compute_id(&self) -> Hash {
        let mut hasher = Sha256Hasher::with_tag(BLOCK_ID_TAG);
        hasher
            .update(&self.index.to_le_bytes())
            .update(&self.root_hash)
            .update(&self.roster.id())
            .update_prefixed(&self.data);
        hasher.finalize()
    }

    /// True if the declared id matches the header contents.
    pub fn is_sealed(&self) -> bool {
        self.block_id == self.compute_id()
    }
}

/// A block the caller already trusts, typically a pinned genesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorBlock {
    /// Trusted block id.
    pub block_id: Hash,
    /// Roster in effect at the anchor.
    pub roster: Roster,
}

impl AnchorBlock {
    /// Create an anchor from an id and roster obtained out-of-band.
    pub fn new(block_id: Hash, roster: Roster) -> Self {
        Self { block_id, roster }
    }

    /// Anchor at a header the caller trusts.
    pub fn from_header(header: &BlockHeader) -> Self {
        Self {
            block_id: header.block_id,
            roster: header.roster.clone(),
        }
    }
}

/// BLS aggregate signature plus the roster members that took part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectiveSignature {
    /// Aggregate of the participants' signatures.
    pub aggregate: [u8; SIGNATURE_LEN],
    /// Participation mask aligned with the signing roster's key order.
    pub participants: Vec<bool>,
}

impl CollectiveSignature {
    /// Number of participating signers.
    pub fn participant_count(&self) -> usize {
        self.participants.iter().filter(|p| **p).count()
    }
}

/// Signed assertion that block `from` is followed by block `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardLink {
    /// Source block id.
    pub from: Hash,
    /// Target block id.
    pub to: Hash,
    /// Roster taking over from `to` onward, if it changes.
    pub new_roster: Option<Roster>,
    /// Signature by the roster in effect at `from`.
    pub signature: CollectiveSignature,
}

impl ForwardLink {
    /// Message the roster signs for this link.
    pub fn message(&self) -> Hash {
        link_message(&self.from, &self.to, self.new_roster.as_ref())
    }
}

/// Signed message for a link between two blocks.
pub fn link_message(from: &Hash, to: &Hash, new_roster: Option<&Roster>) -> Hash {
    let mut hasher = Sha256Hasher::with_tag(LINK_MESSAGE_TAG);
    hasher.update(from).update(to);
    match new_roster {
        Some(roster) => hasher.update(&[0x01]).update(&roster.id()),
        None => hasher.update(&[0x00]),
    };
    hasher.finalize()
}
