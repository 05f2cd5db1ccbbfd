//! # Header Verifier
//!
//! Checks a candidate header against its chain's state: linkage to the
//! stored parent, then a quorum of the active peer set over the digest.

use super::quorum::verify_quorum;
use crate::domain::{invariant_links_to_parent, BlockHeader, ConsensusPeerSet, Hash, VerificationFailure};

/// Verify `header` given the active peer set and the stored parent's digest.
///
/// `parent_digest` is `None` when no header is stored at `height - 1`
/// (including `height == 0`, which has no parent).
///
/// # Checks
/// 1. Parent exists and `previous_hash` equals its digest
/// 2. Signature set meets the peer set threshold
///
/// Returns the number of distinct valid signers.
pub fn verify_header(
    header: &BlockHeader,
    active: &ConsensusPeerSet,
    parent_digest: Option<&Hash>,
) -> Result<usize, VerificationFailure> {
    let parent_digest = parent_digest.ok_or(VerificationFailure::ParentNotFound {
        parent_height: header.height.saturating_sub(1),
    })?;
    invariant_links_to_parent(header, parent_digest)?;

    verify_quorum(active, &header.digest(), &header.signatures)
}
