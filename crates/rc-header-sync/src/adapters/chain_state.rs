//! # Chain State Store
//!
//! Typed reads and writes of per-chain records over any [`KeyValueStore`].
//!
//! ## Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `hs:header:{chain}{height}` | `BlockHeader` |
//! | `hs:header-hash:{chain}{digest}` | height |
//! | `hs:current-height:{chain}` | height |
//! | `hs:peer-set:{chain}{version}` | `ConsensusPeerSet` |
//! | `hs:peer-set-head:{chain}` | latest version |
//! | `hs:cross-chain-msg:{chain}{height}` | `CrossChainMsg` |
//!
//! Stored values are canonical bincode. A value that fails to decode is
//! reported as `StorageError`: it was written by this crate, so a decode
//! failure means the state is corrupt, not that the caller sent bad input.

use crate::codec;
use crate::domain::{
    BlockHeader, ChainId, ConsensusPeerSet, CrossChainMsg, Hash, HeaderSyncError, KeyPrefix,
};
use crate::ports::outbound::{KVStoreError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>, HeaderSyncError> {
    codec::encode(value).map_err(|e| HeaderSyncError::StorageError(e.to_string()))
}

/// Typed chain state on top of a raw key-value store.
pub trait ChainStateStore: KeyValueStore {
    /// Read and decode a record.
    fn read_record<T>(&self, key: &[u8]) -> Result<Option<T>, HeaderSyncError>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(bytes) = self.get(key)? else {
            return Ok(None);
        };
        let record = codec::decode(&bytes, bytes.len()).map_err(|e| KVStoreError::CorruptionError {
            message: format!("record at {}: {e}", hex::encode(key)),
        })?;
        Ok(Some(record))
    }

    /// Header at `height`.
    fn header(&self, chain_id: ChainId, height: u64) -> Result<Option<BlockHeader>, HeaderSyncError> {
        self.read_record(&KeyPrefix::header_key(chain_id, height))
    }

    /// Whether a header is stored at `height`.
    fn has_header(&self, chain_id: ChainId, height: u64) -> Result<bool, HeaderSyncError> {
        Ok(self.exists(&KeyPrefix::header_key(chain_id, height))?)
    }

    /// Height of the header with digest `hash`.
    fn header_height_by_hash(
        &self,
        chain_id: ChainId,
        hash: &Hash,
    ) -> Result<Option<u64>, HeaderSyncError> {
        self.read_record(&KeyPrefix::header_hash_key(chain_id, hash))
    }

    /// Height of the latest stored header.
    fn current_height(&self, chain_id: ChainId) -> Result<Option<u64>, HeaderSyncError> {
        self.read_record(&KeyPrefix::current_height_key(chain_id))
    }

    /// Store a header with its hash index and advance the current height.
    fn put_header(&mut self, chain_id: ChainId, header: &BlockHeader) -> Result<(), HeaderSyncError> {
        let height = encode_record(&header.height)?;
        self.put(
            &KeyPrefix::header_key(chain_id, header.height),
            &encode_record(header)?,
        )?;
        self.put(
            &KeyPrefix::header_hash_key(chain_id, &header.digest()),
            &height,
        )?;
        if self.current_height(chain_id)?.map_or(true, |h| header.height > h) {
            self.put(&KeyPrefix::current_height_key(chain_id), &height)?;
        }
        Ok(())
    }

    /// Peer set `version`.
    fn peer_set(
        &self,
        chain_id: ChainId,
        version: u64,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        self.read_record(&KeyPrefix::peer_set_key(chain_id, version))
    }

    /// Latest peer set version number.
    fn peer_set_head(&self, chain_id: ChainId) -> Result<Option<u64>, HeaderSyncError> {
        self.read_record(&KeyPrefix::peer_set_head_key(chain_id))
    }

    /// Latest peer set.
    fn latest_peer_set(&self, chain_id: ChainId) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        let Some(head) = self.peer_set_head(chain_id)? else {
            return Ok(None);
        };
        self.peer_set(chain_id, head)?
            .map(Some)
            .ok_or_else(|| missing_version(chain_id, head))
    }

    /// Latest peer set version introduced at or below `height`.
    ///
    /// Binary search over `0..=head`; `introduced_at` increases with version.
    fn peer_set_at_height(
        &self,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        let Some(head) = self.peer_set_head(chain_id)? else {
            return Ok(None);
        };
        let mut best = self
            .peer_set(chain_id, 0)?
            .ok_or_else(|| missing_version(chain_id, 0))?;
        if best.introduced_at > height {
            return Ok(None);
        }

        let (mut lo, mut hi) = (0u64, head);
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            let set = self
                .peer_set(chain_id, mid)?
                .ok_or_else(|| missing_version(chain_id, mid))?;
            if set.introduced_at <= height {
                lo = mid;
                best = set;
            } else {
                hi = mid - 1;
            }
        }
        Ok(Some(best))
    }

    /// Store a peer set version and make it the head.
    fn put_peer_set(&mut self, peer_set: &ConsensusPeerSet) -> Result<(), HeaderSyncError> {
        self.put(
            &KeyPrefix::peer_set_key(peer_set.chain_id, peer_set.version),
            &encode_record(peer_set)?,
        )?;
        self.put(
            &KeyPrefix::peer_set_head_key(peer_set.chain_id),
            &encode_record(&peer_set.version)?,
        )?;
        Ok(())
    }

    /// Cross-chain message at `height`.
    fn cross_chain_msg(
        &self,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<CrossChainMsg>, HeaderSyncError> {
        self.read_record(&KeyPrefix::cross_chain_msg_key(chain_id, height))
    }

    /// Whether a message is stored at `height`.
    fn has_cross_chain_msg(&self, chain_id: ChainId, height: u64) -> Result<bool, HeaderSyncError> {
        Ok(self.exists(&KeyPrefix::cross_chain_msg_key(chain_id, height))?)
    }

    /// Store a cross-chain message under its own chain and height.
    fn put_cross_chain_msg(&mut self, msg: &CrossChainMsg) -> Result<(), HeaderSyncError> {
        self.put(
            &KeyPrefix::cross_chain_msg_key(msg.chain_id, msg.height),
            &encode_record(msg)?,
        )?;
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> ChainStateStore for S {}

fn missing_version(chain_id: ChainId, version: u64) -> HeaderSyncError {
    HeaderSyncError::StorageError(format!(
        "peer set v{version} of chain {chain_id} missing below head"
    ))
}
