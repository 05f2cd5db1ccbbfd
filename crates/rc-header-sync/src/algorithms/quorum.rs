//! # Quorum Check
//!
//! Counts distinct valid signers of a digest against one peer set version.
//!
//! Every entry must be well-formed: a single unauthorized, repeated or
//! invalid entry fails the whole set even when the remaining entries would
//! reach the threshold.

use crate::domain::{ConsensusPeerSet, Hash, SignatureEntry, VerificationFailure};
use std::collections::BTreeSet;

/// Verify `signatures` over `digest` against `peer_set`.
///
/// Returns the number of distinct valid signers.
pub fn verify_quorum(
    peer_set: &ConsensusPeerSet,
    digest: &Hash,
    signatures: &[SignatureEntry],
) -> Result<usize, VerificationFailure> {
    let mut signed = BTreeSet::new();

    for (index, entry) in signatures.iter().enumerate() {
        if !peer_set.contains(&entry.public_key) {
            return Err(VerificationFailure::UnauthorizedSigner {
                index,
                version: peer_set.version,
            });
        }
        if !signed.insert(entry.public_key) {
            return Err(VerificationFailure::DuplicateSigner { index });
        }
        entry
            .public_key
            .verify(digest, &entry.signature)
            .map_err(|source| VerificationFailure::InvalidSignature { index, source })?;
    }

    let required = peer_set.threshold as usize;
    if signed.len() < required {
        return Err(VerificationFailure::InsufficientSignatures {
            got: signed.len(),
            required,
        });
    }
    Ok(signed.len())
}
