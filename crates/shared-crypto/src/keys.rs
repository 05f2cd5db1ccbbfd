//! # Algorithm-Tagged Keys
//!
//! Side-chains authenticate with either Ed25519 or secp256k1 consensus keys.
//! `PublicKey` and `Signature` carry the scheme as an enum tag so a peer set
//! may mix schemes and a signature can only verify against a key of its own
//! scheme.

use crate::ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
use crate::signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Consensus peer public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PublicKey {
    /// Ed25519 key.
    Ed25519(Ed25519PublicKey),
    /// Compressed secp256k1 key.
    Secp256k1(Secp256k1PublicKey),
}

impl PublicKey {
    /// Scheme name, for logs and error messages.
    pub fn algorithm(&self) -> &'static str {
        match self {
            PublicKey::Ed25519(_) => "ed25519",
            PublicKey::Secp256k1(_) => "secp256k1",
        }
    }

    /// One-byte scheme tag used when keys are fed into digests.
    pub fn scheme_id(&self) -> u8 {
        match self {
            PublicKey::Ed25519(_) => 0,
            PublicKey::Secp256k1(_) => 1,
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(key) => key.as_bytes(),
            PublicKey::Secp256k1(key) => key.as_bytes(),
        }
    }

    /// Check the key is a valid point for its scheme.
    pub fn validate(&self) -> Result<(), CryptoError> {
        match self {
            PublicKey::Ed25519(key) => key.validate(),
            PublicKey::Secp256k1(key) => key.validate(),
        }
    }

    /// Verify `signature` over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        match (self, signature) {
            (PublicKey::Ed25519(key), Signature::Ed25519(sig)) => key.verify(message, sig),
            (PublicKey::Secp256k1(key), Signature::Secp256k1(sig)) => key.verify(message, sig),
            _ => Err(CryptoError::AlgorithmMismatch {
                key: self.algorithm(),
                signature: signature.algorithm(),
            }),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.as_bytes();
        write!(f, "{}:{}", self.algorithm(), hex::encode(&bytes[..bytes.len().min(6)]))
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PublicKey::Ed25519(key)
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        PublicKey::Secp256k1(key)
    }
}

/// Consensus peer signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signature {
    /// Ed25519 signature.
    Ed25519(Ed25519Signature),
    /// secp256k1 r||s signature.
    Secp256k1(Secp256k1Signature),
}

impl Signature {
    /// Scheme name.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Signature::Ed25519(_) => "ed25519",
            Signature::Secp256k1(_) => "secp256k1",
        }
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        match self {
            Signature::Ed25519(sig) => sig.as_bytes(),
            Signature::Secp256k1(sig) => sig.as_bytes(),
        }
    }
}

impl From<Ed25519Signature> for Signature {
    fn from(sig: Ed25519Signature) -> Self {
        Signature::Ed25519(sig)
    }
}

impl From<Secp256k1Signature> for Signature {
    fn from(sig: Secp256k1Signature) -> Self {
        Signature::Secp256k1(sig)
    }
}

/// Signing keypair of either scheme.
pub enum KeyPair {
    /// Ed25519 keypair.
    Ed25519(Ed25519KeyPair),
    /// secp256k1 keypair.
    Secp256k1(Secp256k1KeyPair),
}

impl KeyPair {
    /// Public half.
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyPair::Ed25519(pair) => pair.public_key().into(),
            KeyPair::Secp256k1(pair) => pair.public_key().into(),
        }
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        match self {
            KeyPair::Ed25519(pair) => pair.sign(message).into(),
            KeyPair::Secp256k1(pair) => pair.sign(message).into(),
        }
    }
}
