//! # Proof Wire Codec
//!
//! bincode encoding of a proof. The serde records here mirror the domain
//! records one-to-one and never leave this module.
//!
//! Decoding is bounded by `max_proof_bytes` and rejects trailing bytes.
//! Fixed-width digests, keys and signatures are fixed-size arrays on the
//! wire, so a field of the wrong length fails to decode.

use crate::application::Proof;
use crate::config::ProofVerifierConfig;
use crate::domain::{
    BlockHeader, CollectiveSignature, ForwardLink, Hash, InclusionPath, ProofError, PublicKey,
    Roster, Step, TrieNode, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
use bincode::Options;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use tracing::debug;

#[derive(Serialize, Deserialize)]
enum WireNode {
    Empty,
    Leaf { key: Vec<u8>, values: Vec<Vec<u8>> },
    Interior { left: Hash, right: Hash },
}

#[derive(Serialize, Deserialize)]
struct WireStep {
    left: WireNode,
    right: WireNode,
}

#[derive(Serialize, Deserialize)]
struct WirePath {
    key: Vec<u8>,
    steps: Vec<WireStep>,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct WireRoster {
    #[serde_as(as = "Vec<Bytes>")]
    keys: Vec<[u8; PUBLIC_KEY_LEN]>,
}

#[derive(Serialize, Deserialize)]
struct WireHeader {
    block_id: Hash,
    index: u64,
    root_hash: Hash,
    roster: WireRoster,
    data: Vec<u8>,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct WireSignature {
    #[serde_as(as = "Bytes")]
    aggregate: [u8; SIGNATURE_LEN],
    participants: Vec<bool>,
}

#[derive(Serialize, Deserialize)]
struct WireLink {
    from: Hash,
    to: Hash,
    new_roster: Option<WireRoster>,
    signature: WireSignature,
}

#[derive(Serialize, Deserialize)]
struct WireProof {
    path: WirePath,
    latest: WireHeader,
    links: Vec<WireLink>,
}

/// Decode a proof from its wire bytes.
///
/// # Errors
/// - `Decode` if the input is larger than `config.max_proof_bytes`,
///   truncated, has trailing bytes, or holds a field of the wrong length
pub fn decode_proof(bytes: &[u8], config: &ProofVerifierConfig) -> Result<Proof, ProofError> {
    if bytes.len() as u64 > config.max_proof_bytes {
        return Err(ProofError::Decode(format!(
            "proof is {} bytes, limit is {}",
            bytes.len(),
            config.max_proof_bytes
        )));
    }

    let wire: WireProof = bincode::DefaultOptions::new()
        .with_limit(config.max_proof_bytes)
        .deserialize(bytes)?;

    debug!(
        bytes = bytes.len(),
        steps = wire.path.steps.len(),
        links = wire.links.len(),
        "proof decoded"
    );

    Ok(Proof::new(
        wire.path.into(),
        wire.latest.into(),
        wire.links.into_iter().map(ForwardLink::from).collect(),
    ))
}

/// Encode a proof into its wire bytes.
pub fn encode_proof(proof: &Proof) -> Result<Vec<u8>, ProofError> {
    let wire = WireProof {
        path: proof.inclusion_path().into(),
        latest: proof.latest().into(),
        links: proof.links().iter().map(WireLink::from).collect(),
    };
    Ok(bincode::DefaultOptions::new().serialize(&wire)?)
}

// =============================================================================
// Wire -> domain
// =============================================================================

impl From<WireNode> for TrieNode {
    fn from(node: WireNode) -> Self {
        match node {
            WireNode::Empty => TrieNode::Empty,
            WireNode::Leaf { key, values } => TrieNode::Leaf { key, values },
            WireNode::Interior { left, right } => TrieNode::Interior { left, right },
        }
    }
}

impl From<WirePath> for InclusionPath {
    fn from(path: WirePath) -> Self {
        let steps = path
            .steps
            .into_iter()
            .map(|s| Step::new(s.left.into(), s.right.into()))
            .collect();
        InclusionPath::new(path.key, steps)
    }
}

impl From<WireRoster> for Roster {
    fn from(roster: WireRoster) -> Self {
        Roster::new(roster.keys.into_iter().map(PublicKey).collect())
    }
}

impl From<WireHeader> for BlockHeader {
    fn from(header: WireHeader) -> Self {
        // Keep the declared id: verification checks it against the contents
        BlockHeader {
            block_id: header.block_id,
            index: header.index,
            root_hash: header.root_hash,
            roster: header.roster.into(),
            data: header.data,
        }
    }
}

impl From<WireLink> for ForwardLink {
    fn from(link: WireLink) -> Self {
        ForwardLink {
            from: link.from,
            to: link.to,
            new_roster: link.new_roster.map(Roster::from),
            signature: CollectiveSignature {
                aggregate: link.signature.aggregate,
                participants: link.signature.participants,
            },
        }
    }
}

// =============================================================================
// Domain -> wire
// =============================================================================

impl From<&TrieNode> for WireNode {
    fn from(node: &TrieNode) -> Self {
        match node {
            TrieNode::Empty => WireNode::Empty,
            TrieNode::Leaf { key, values } => WireNode::Leaf {
                key: key.clone(),
                values: values.clone(),
            },
            TrieNode::Interior { left, right } => WireNode::Interior {
                left: *left,
                right: *right,
            },
        }
    }
}

impl From<&InclusionPath> for WirePath {
    fn from(path: &InclusionPath) -> Self {
        WirePath {
            key: path.key.clone(),
            steps: path
                .steps
                .iter()
                .map(|s| WireStep {
                    left: (&s.left).into(),
                    right: (&s.right).into(),
                })
                .collect(),
        }
    }
}

impl From<&Roster> for WireRoster {
    fn from(roster: &Roster) -> Self {
        WireRoster {
            keys: roster.keys.iter().map(|k| k.0).collect(),
        }
    }
}

impl From<&BlockHeader> for WireHeader {
    fn from(header: &BlockHeader) -> Self {
        WireHeader {
            block_id: header.block_id,
            index: header.index,
            root_hash: header.root_hash,
            roster: (&header.roster).into(),
            data: header.data.clone(),
        }
    }
}

impl From<&ForwardLink> for WireLink {
    fn from(link: &ForwardLink) -> Self {
        WireLink {
            from: link.from,
            to: link.to,
            new_roster: link.new_roster.as_ref().map(WireRoster::from),
            signature: WireSignature {
                aggregate: link.signature.aggregate,
                participants: link.signature.participants.clone(),
            },
        }
    }
}
