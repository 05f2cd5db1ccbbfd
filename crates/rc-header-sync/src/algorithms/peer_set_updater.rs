//! # Peer Set Updater
//!
//! Derives peer set versions from headers. Only the genesis header and
//! headers that already passed verification are ever handed to a policy.

use crate::domain::{
    invariant_valid_signer_list, BlockHeader, ChainId, ConsensusPeerSet, HeaderSyncError,
    QuorumRule, GENESIS_HEIGHT,
};

/// Rule deriving peer sets from header content.
pub trait PeerSetPolicy: Send + Sync {
    /// Peer set version 0 from the genesis header.
    fn genesis_peer_set(
        &self,
        chain_id: ChainId,
        header: &BlockHeader,
    ) -> Result<ConsensusPeerSet, HeaderSyncError>;

    /// Next version if the verified `header` rotates the set, else `None`.
    fn next_peer_set(
        &self,
        current: &ConsensusPeerSet,
        header: &BlockHeader,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError>;
}

/// Takes the signer list from `BlockHeader::embedded_peer_set` and applies a
/// fixed quorum rule.
#[derive(Clone, Debug)]
pub struct EmbeddedPeerSetPolicy {
    rule: QuorumRule,
    max_size: usize,
}

impl EmbeddedPeerSetPolicy {
    /// Create a policy.
    pub fn new(rule: QuorumRule, max_size: usize) -> Self {
        Self { rule, max_size }
    }
}

impl PeerSetPolicy for EmbeddedPeerSetPolicy {
    fn genesis_peer_set(
        &self,
        chain_id: ChainId,
        header: &BlockHeader,
    ) -> Result<ConsensusPeerSet, HeaderSyncError> {
        let signers = header.embedded_peer_set.as_ref().ok_or_else(|| {
            HeaderSyncError::InvalidPeerSet("genesis header carries no peer set".to_string())
        })?;
        invariant_valid_signer_list(signers, self.max_size)?;

        Ok(ConsensusPeerSet::new(
            chain_id,
            0,
            GENESIS_HEIGHT,
            signers.clone(),
            self.rule,
        ))
    }

    fn next_peer_set(
        &self,
        current: &ConsensusPeerSet,
        header: &BlockHeader,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        let Some(signers) = &header.embedded_peer_set else {
            return Ok(None);
        };
        invariant_valid_signer_list(signers, self.max_size)?;

        let version = current.version.checked_add(1).ok_or_else(|| {
            HeaderSyncError::InvalidPeerSet("peer set version overflow".to_string())
        })?;
        Ok(Some(ConsensusPeerSet::new(
            current.chain_id,
            version,
            header.height,
            signers.clone(),
            self.rule,
        )))
    }
}
