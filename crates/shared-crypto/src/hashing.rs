//! # SHA-256 Hashing
//!
//! Digests used for header linkage, signing payloads and identity derivation.
//! Tagged hashes prefix a fixed domain tag so a digest of one record kind can
//! never be replayed as another.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Stateful SHA-256 hasher.
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher already fed with a domain tag.
    pub fn tagged(tag: &str) -> Self {
        let mut hasher = Self::new();
        hasher.update(tag.as_bytes());
        hasher
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
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

/// Hash the concatenation of multiple inputs.
pub fn sha256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

/// Hash `data` under a domain tag: `SHA-256(tag || data)`.
pub fn tagged_sha256(tag: &str, data: &[u8]) -> Hash {
    let mut hasher = Sha256Hasher::tagged(tag);
    hasher.update(data);
    hasher.finalize()
}
