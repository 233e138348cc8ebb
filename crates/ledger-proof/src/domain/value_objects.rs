//! # Domain Value Objects
//!
//! Views and outcomes derived from a decoded proof.

use super::errors::ProofError;
use super::invariants::LEDGER_INSTANCE_ARITY;
use std::fmt;

/// Identifier of the access-control rules guarding an instance.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessControlId(Vec<u8>);

impl AccessControlId {
    /// Wrap raw identifier bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lower-case hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for AccessControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessControlId({})", self.to_hex())
    }
}

impl fmt::Display for AccessControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Borrowed view of the leaf that matched the queried key.
///
/// `values()` never fails. The typed accessors require the three-field
/// ledger instance layout and report `MalformedProof` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafEntry<'a> {
    key: &'a [u8],
    values: &'a [Vec<u8>],
}

impl<'a> LeafEntry<'a> {
    /// Create a view over a leaf's key and values.
    pub fn new(key: &'a [u8], values: &'a [Vec<u8>]) -> Self {
        Self { key, values }
    }

    /// Leaf key.
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// All value fields, in order.
    pub fn values(&self) -> &'a [Vec<u8>] {
        self.values
    }

    /// True if the leaf has exactly the ledger instance arity.
    pub fn is_ledger_instance(&self) -> bool {
        self.values.len() == LEDGER_INSTANCE_ARITY
    }

    fn field(&self, index: usize) -> Result<&'a [u8], ProofError> {
        if self.values.len() < LEDGER_INSTANCE_ARITY {
            return Err(ProofError::MalformedProof(format!(
                "leaf has {} value fields, need {}",
                self.values.len(),
                LEDGER_INSTANCE_ARITY
            )));
        }
        Ok(&self.values[index])
    }

    /// Stored state value (field 0).
    pub fn value(&self) -> Result<&'a [u8], ProofError> {
        self.field(0)
    }

    /// Contract identifier (field 1, UTF-8).
    pub fn contract_id(&self) -> Result<&'a str, ProofError> {
        let raw = self.field(1)?;
        std::str::from_utf8(raw)
            .map_err(|e| ProofError::MalformedProof(format!("contract id is not UTF-8: {}", e)))
    }

    /// Access-control identifier (field 2).
    pub fn access_control_id(&self) -> Result<AccessControlId, ProofError> {
        self.field(2).map(|raw| AccessControlId::new(raw.to_vec()))
    }

    /// Owned copy of the typed fields.
    pub fn to_instance(&self) -> Result<LedgerInstance, ProofError> {
        Ok(LedgerInstance {
            key: self.key.to_vec(),
            value: self.value()?.to_vec(),
            contract_id: self.contract_id()?.to_string(),
            access_control_id: self.access_control_id()?,
        })
    }
}

/// Owned, typed ledger instance read from a verified proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerInstance {
    /// Instance key.
    pub key: Vec<u8>,
    /// Stored state value.
    pub value: Vec<u8>,
    /// Contract the instance belongs to.
    pub contract_id: String,
    /// Access-control rules guarding the instance.
    pub access_control_id: AccessControlId,
}

/// Result of resolving the terminal step of an inclusion path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership<'a> {
    /// The key is stored in the trie.
    Present(LeafEntry<'a>),
    /// The key is provably not stored in the trie.
    Absent,
}

impl Membership<'_> {
    /// True for an inclusion result.
    pub fn is_present(&self) -> bool {
        matches!(self, Membership::Present(_))
    }
}

/// Verification state machine.
///
/// `Decoded → RootVerified → ChainVerified → Accepted`, or `Rejected`
/// from any stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofState {
    /// Bytes decoded into records.
    Decoded,
    /// Recomputed root equals the latest header's root.
    RootVerified,
    /// Latest block reachable from the anchor through signed links.
    ChainVerified,
    /// Every stage passed.
    Accepted,
    /// A stage failed.
    Rejected(ProofError),
}

impl ProofState {
    /// True only for `Accepted`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProofState::Accepted)
    }

    /// Map the terminal state onto a result.
    pub fn into_result(self) -> Result<(), ProofError> {
        match self {
            ProofState::Accepted => Ok(()),
            ProofState::Rejected(err) => Err(err),
            other => Err(ProofError::MalformedProof(format!(
                "verification stopped in non-terminal state {:?}",
                other
            ))),
        }
    }
}

/// Outcome of verifying a proof for its own key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofOutcome {
    /// Verified inclusion of a ledger instance.
    Present(LedgerInstance),
    /// Verified absence of the key.
    Absent {
        /// Key proven absent.
        key: Vec<u8>,
    },
}
