//! # Domain Invariants
//!
//! Structural rules checked before any signature work.

use super::entities::BlockHeader;
use super::errors::{HeaderSyncError, Hash, VerificationFailure};
use shared_crypto::PublicKey;
use std::collections::BTreeSet;

/// Height every chain's bootstrap header must carry.
pub const GENESIS_HEIGHT: u64 = 0;

/// Invariant: a signer list is non-empty, bounded, made of valid curve
/// points and free of duplicates.
pub fn invariant_valid_signer_list(
    signers: &[PublicKey],
    max_size: usize,
) -> Result<(), HeaderSyncError> {
    if signers.is_empty() {
        return Err(HeaderSyncError::InvalidPeerSet(
            "signer list is empty".to_string(),
        ));
    }
    if signers.len() > max_size {
        return Err(HeaderSyncError::InvalidPeerSet(format!(
            "{} signers exceeds limit of {}",
            signers.len(),
            max_size
        )));
    }

    let mut seen = BTreeSet::new();
    for (index, key) in signers.iter().enumerate() {
        key.validate().map_err(|e| {
            HeaderSyncError::InvalidPeerSet(format!("signer #{index} ({key}): {e}"))
        })?;
        if !seen.insert(key) {
            return Err(HeaderSyncError::InvalidPeerSet(format!(
                "signer #{index} ({key}) is duplicated"
            )));
        }
    }
    Ok(())
}

/// Invariant: a non-genesis header links to the digest of its stored parent.
pub fn invariant_links_to_parent(
    header: &BlockHeader,
    parent_digest: &Hash,
) -> Result<(), VerificationFailure> {
    if &header.previous_hash != parent_digest {
        return Err(VerificationFailure::PreviousHashMismatch {
            expected: *parent_digest,
            got: header.previous_hash,
        });
    }
    Ok(())
}

/// Invariant: batches stay within the configured item limit.
pub fn invariant_batch_size(len: usize, max: usize, what: &str) -> Result<(), HeaderSyncError> {
    if len > max {
        return Err(HeaderSyncError::MalformedInput(format!(
            "{len} {what} exceeds per-call limit of {max}"
        )));
    }
    Ok(())
}
