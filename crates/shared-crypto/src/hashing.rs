//! # SHA-256 Hashing
//!
//! Streaming and one-shot SHA-256 with single-byte domain tags.

use sha2::{Digest, Sha256};

/// SHA-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Stateful SHA-256 hasher.
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Create a hasher whose first absorbed byte is `tag`.
    pub fn with_tag(tag: u8) -> Self {
        let mut hasher = Self::new();
        hasher.update(&[tag]);
        hasher
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Absorb a length as a little-endian u64.
    pub fn update_len(&mut self, len: usize) -> &mut Self {
        self.inner.update((len as u64).to_le_bytes());
        self
    }

    /// Absorb a length-prefixed byte string.
    pub fn update_prefixed(&mut self, data: &[u8]) -> &mut Self {
        self.update_len(data.len());
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash multiple inputs behind a one-byte domain tag.
pub fn tagged_hash(tag: u8, inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256Hasher::with_tag(tag);
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}
