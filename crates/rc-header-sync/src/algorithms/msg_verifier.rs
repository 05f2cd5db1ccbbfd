//! # Cross-Chain Message Verifier
//!
//! A message is checked against the peer set that was active at its claimed
//! height, which may be older than the chain's current set.

use super::quorum::verify_quorum;
use crate::domain::{ConsensusPeerSet, CrossChainMsg, VerificationFailure};

/// Reject a claimed height above the chain's synced header height.
///
/// Rotations between the synced tip and the claimed height are unknown, so
/// no peer set can be resolved for it yet.
pub fn check_msg_height(height: u64, synced_height: u64) -> Result<(), VerificationFailure> {
    if height > synced_height {
        return Err(VerificationFailure::HeightNotSynced {
            height,
            synced: synced_height,
        });
    }
    Ok(())
}

/// Verify `msg` against the peer set active at `msg.height`.
pub fn verify_cross_chain_msg(
    msg: &CrossChainMsg,
    active_at_height: &ConsensusPeerSet,
) -> Result<usize, VerificationFailure> {
    verify_quorum(active_at_height, &msg.digest(), &msg.signatures)
}
