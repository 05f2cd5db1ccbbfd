//! # Shared Crypto - Signature and Digest Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Header / message digests, identity derivation |
//! | `signatures` | Ed25519 | Side-chain consensus peer signatures |
//! | `ecdsa` | secp256k1 | Side-chain consensus peer signatures |
//! | `keys` | both | Algorithm-tagged `PublicKey` / `Signature` |
//!
//! ## Security Properties
//!
//! - **Ed25519**: strict verification (rejects small-order keys and non-canonical `R`)
//! - **secp256k1**: RFC 6979 deterministic signing, high-S signatures rejected on verify
//! - All verification is deterministic: identical inputs give identical results on every node

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod signatures;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, tagged_sha256, Hash, Sha256Hasher};
pub use keys::{KeyPair, PublicKey, Signature};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
