//! # Inbound Ports
//!
//! Entry points the host dispatches to, and read-only lookups over a chain's
//! synced state.

use crate::domain::{BlockHeader, ChainId, ConsensusPeerSet, CrossChainMsg, Hash, HeaderSyncError};
use crate::ports::outbound::{InvocationContext, KeyValueStore};

/// Header sync API - inbound port.
///
/// Each call is all-or-nothing: on error no store write has been issued.
pub trait HeaderSyncApi {
    /// Bootstrap a chain from its genesis header (operator only).
    fn sync_genesis_header<C: InvocationContext>(&self, ctx: &mut C)
        -> Result<(), HeaderSyncError>;

    /// Verify and append an ordered batch of headers.
    fn sync_block_header<C: InvocationContext>(&self, ctx: &mut C) -> Result<(), HeaderSyncError>;

    /// Verify and store an ordered batch of cross-chain messages.
    fn sync_cross_chain_msg<C: InvocationContext>(
        &self,
        ctx: &mut C,
    ) -> Result<(), HeaderSyncError>;
}

/// Read-only queries over synced state.
pub trait HeaderSyncQuery {
    /// Header stored at `height`.
    fn header_by_height<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<BlockHeader>, HeaderSyncError>;

    /// Header whose digest is `hash`.
    fn header_by_hash<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        hash: &Hash,
    ) -> Result<Option<BlockHeader>, HeaderSyncError>;

    /// Height of the latest synced header.
    fn current_height<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
    ) -> Result<Option<u64>, HeaderSyncError>;

    /// Peer set version active at `height`.
    fn consensus_peer_set_at<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError>;

    /// Latest peer set version.
    fn latest_consensus_peer_set<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError>;

    /// Cross-chain message stored at `height`.
    fn cross_chain_msg<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<CrossChainMsg>, HeaderSyncError>;
}
