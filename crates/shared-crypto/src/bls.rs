//! BLS12-381 Signature Implementation
//!
//! Provides BLS signature primitives for:
//! - Deterministic key derivation
//! - Signing and signature aggregation
//! - Aggregate verification over a set of signers
//!
//! Used by the ledger proof verifier to check collective roster signatures
//! on forward links. Public keys live in G1 (48 bytes), signatures in G2
//! (96 bytes).

use blst::min_pk::{AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

use crate::CryptoError;

/// Domain separation tag for BLS signatures (proof-of-possession scheme)
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed public key length.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed signature length.
pub const SIGNATURE_LEN: usize = 96;

/// BLS public key (48 bytes compressed)
#[derive(Clone, Debug)]
pub struct BlsPublicKey(PublicKey);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

/// BLS signature (96 bytes)
#[derive(Clone, Debug)]
pub struct BlsSignature(Signature);

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsSignature {}

/// BLS key pair for signing operations
pub struct BlsKeyPair {
    secret: SecretKey,
    public: BlsPublicKey,
}

impl BlsKeyPair {
    /// Derive a key pair from 32 bytes of input key material.
    ///
    /// The same seed always yields the same key pair.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret = SecretKey::key_gen(seed, &[]).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let public = BlsPublicKey(secret.sk_to_pk());
        Ok(Self { secret, public })
    }

    /// Create from existing secret key bytes
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret = SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let public = BlsPublicKey(secret.sk_to_pk());
        Ok(Self { secret, public })
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.secret.sign(message, DST, &[]))
    }

    /// Get the public key
    pub fn public_key(&self) -> BlsPublicKey {
        self.public.clone()
    }

    /// Get the secret key bytes (be careful with this!)
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }
}

impl BlsPublicKey {
    /// Parse and subgroup-check a 48-byte compressed public key
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, CryptoError> {
        PublicKey::key_validate(bytes)
            .map(BlsPublicKey)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to 48-byte compressed form
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.to_bytes()
    }
}

impl BlsSignature {
    /// Create from 96-byte representation
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LEN]) -> Result<Self, CryptoError> {
        Signature::from_bytes(bytes)
            .map(BlsSignature)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Serialize to 96-byte form
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0.to_bytes()
    }

    /// Aggregate multiple signatures into one
    ///
    /// The result is checked with [`verify_aggregate`] over the signers' keys.
    pub fn aggregate(sigs: &[BlsSignature]) -> Result<Self, CryptoError> {
        if sigs.is_empty() {
            return Err(CryptoError::InvalidInput("empty signature list".into()));
        }
        let refs: Vec<&Signature> = sigs.iter().map(|s| &s.0).collect();
        AggregateSignature::aggregate(&refs, true)
            .map(|asig| BlsSignature(asig.to_signature()))
            .map_err(|_| CryptoError::AggregationFailed)
    }
}

/// Verify an aggregate signature of `message` by every key in `signers`.
///
/// All signers must have signed the same message. Keys are assumed to be
/// validated already (see [`BlsPublicKey::from_bytes`]).
pub fn verify_aggregate(
    message: &[u8],
    signature: &BlsSignature,
    signers: &[BlsPublicKey],
) -> Result<(), CryptoError> {
    if signers.is_empty() {
        return Err(CryptoError::InvalidInput("empty signer list".into()));
    }
    let refs: Vec<&PublicKey> = signers.iter().map(|k| &k.0).collect();
    match signature.0.fast_aggregate_verify(true, message, DST, &refs) {
        BLST_ERROR::BLST_SUCCESS => Ok(()),
        _ => Err(CryptoError::SignatureVerificationFailed),
    }
}
