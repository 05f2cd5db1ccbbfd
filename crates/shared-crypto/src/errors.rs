//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature encoding
    #[error("Invalid signature")]
    InvalidSignature,

    /// Public key bytes are not a valid curve point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key bytes are out of range
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Key and signature belong to different schemes
    #[error("Signature algorithm {signature} does not match key algorithm {key}")]
    AlgorithmMismatch {
        /// Algorithm of the public key
        key: &'static str,
        /// Algorithm of the signature
        signature: &'static str,
    },
}
