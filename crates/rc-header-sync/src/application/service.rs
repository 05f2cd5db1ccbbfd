//! # Header Sync Service
//!
//! Orchestrates the three entry points. Each call decodes its params, then
//! runs duplicate check, verification, store and (for headers) peer set
//! update per item, in submission order.
//!
//! ## Atomicity
//!
//! All writes of a call go to a [`StateOverlay`]. Later items read the
//! writes of earlier ones through it, so a rotation in header `h` governs
//! header `h + 1` of the same batch. The overlay is committed with one
//! atomic batch write only after every item succeeded; on any error it is
//! dropped and the host store sees no mutation.

use crate::adapters::{ChainStateStore, StateOverlay};
use crate::algorithms::{
    check_msg_height, verify_cross_chain_msg, verify_header, EmbeddedPeerSetPolicy, PeerSetPolicy,
};
use crate::application::params::{
    SyncBlockHeaderParam, SyncCrossChainMsgParam, SyncGenesisHeaderParam, SyncMethod,
};
use crate::codec;
use crate::config::{ConfigError, HeaderSyncConfig};
use crate::domain::{
    invariant_batch_size, BlockHeader, ChainId, ConsensusPeerSet, CrossChainMsg, Hash,
    HeaderSyncError, OperatorIdentity, RecordKind, VerificationFailure, GENESIS_HEIGHT,
};
use crate::metrics;
use crate::ports::{HeaderSyncApi, HeaderSyncQuery, InvocationContext, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

/// Header sync service.
///
/// Holds no chain state: every call re-reads what it needs from the host store.
pub struct HeaderSyncService<P: PeerSetPolicy = EmbeddedPeerSetPolicy> {
    /// Configuration.
    config: HeaderSyncConfig,
    /// Identity allowed to bootstrap chains.
    operator: OperatorIdentity,
    /// Peer set derivation rule.
    policy: P,
}

impl HeaderSyncService<EmbeddedPeerSetPolicy> {
    /// Create a service with the embedded peer set policy.
    pub fn new(config: HeaderSyncConfig) -> Result<Self, ConfigError> {
        let policy = EmbeddedPeerSetPolicy::new(config.quorum_rule, config.max_peer_set_size);
        Self::with_policy(config, policy)
    }
}

impl<P: PeerSetPolicy> HeaderSyncService<P> {
    /// Create a service with a custom peer set policy.
    pub fn with_policy(config: HeaderSyncConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let operator = OperatorIdentity::from_bookkeepers(&config.operator_bookkeepers);
        info!(
            operator = %hex::encode(operator.address()),
            bookkeepers = config.operator_bookkeepers.len(),
            "[rc-hs] Header sync service ready"
        );
        Ok(Self {
            config,
            operator,
            policy,
        })
    }

    /// Identity the genesis witness check runs against.
    pub fn operator(&self) -> &OperatorIdentity {
        &self.operator
    }

    /// Active configuration.
    pub fn config(&self) -> &HeaderSyncConfig {
        &self.config
    }

    /// Dispatch by host method name.
    pub fn invoke<C: InvocationContext>(
        &self,
        method: &str,
        ctx: &mut C,
    ) -> Result<(), HeaderSyncError> {
        match method.parse::<SyncMethod>()? {
            SyncMethod::SyncGenesisHeader => self.sync_genesis_header(ctx),
            SyncMethod::SyncBlockHeader => self.sync_block_header(ctx),
            SyncMethod::SyncCrossChainMsg => self.sync_cross_chain_msg(ctx),
        }
    }

    fn decode_untrusted<T>(&self, bytes: &[u8], what: &str) -> Result<T, HeaderSyncError>
    where
        T: Serialize + DeserializeOwned,
    {
        codec::decode(bytes, self.config.max_input_bytes)
            .map_err(|e| HeaderSyncError::MalformedInput(format!("{what}: {e}")))
    }

    fn genesis<S: KeyValueStore>(
        &self,
        store: &mut S,
        chain_id: ChainId,
        header: &BlockHeader,
    ) -> Result<ConsensusPeerSet, HeaderSyncError> {
        if header.height != GENESIS_HEIGHT {
            return Err(HeaderSyncError::MalformedInput(format!(
                "genesis header has height {}",
                header.height
            )));
        }

        let mut overlay = StateOverlay::new(store);
        if overlay.has_header(chain_id, GENESIS_HEIGHT)? {
            return Err(HeaderSyncError::AlreadySynced {
                chain_id,
                position: GENESIS_HEIGHT,
                kind: RecordKind::Header,
            });
        }
        if overlay.peer_set_head(chain_id)?.is_some() {
            return Err(HeaderSyncError::AlreadySynced {
                chain_id,
                position: 0,
                kind: RecordKind::PeerSet,
            });
        }

        let peer_set = self.policy.genesis_peer_set(chain_id, header)?;
        overlay.put_header(chain_id, header)?;
        overlay.put_peer_set(&peer_set)?;
        overlay.commit()?;
        Ok(peer_set)
    }

    fn headers<S: KeyValueStore>(
        &self,
        store: &mut S,
        chain_id: ChainId,
        raw_headers: &[Vec<u8>],
    ) -> Result<u64, HeaderSyncError> {
        let mut overlay = StateOverlay::new(store);
        let mut rotations = 0u64;

        for raw in raw_headers {
            let header: BlockHeader = self.decode_untrusted(raw, "header")?;
            let height = header.height;

            if overlay.has_header(chain_id, height)? {
                return Err(HeaderSyncError::AlreadySynced {
                    chain_id,
                    position: height,
                    kind: RecordKind::Header,
                });
            }

            let active = overlay.latest_peer_set(chain_id)?.ok_or_else(|| {
                HeaderSyncError::verification(chain_id, height, VerificationFailure::NoActivePeerSet)
            })?;
            let parent_digest: Option<Hash> = match height.checked_sub(1) {
                Some(parent) => overlay.header(chain_id, parent)?.map(|p| p.digest()),
                None => None,
            };
            let signers = verify_header(&header, &active, parent_digest.as_ref())
                .map_err(|reason| HeaderSyncError::verification(chain_id, height, reason))?;

            overlay.put_header(chain_id, &header)?;
            debug!(
                chain_id,
                height,
                signers,
                version = active.version,
                epoch_change = header.is_epoch_change(),
                "[rc-hs] Header verified"
            );

            if let Some(next) = self.policy.next_peer_set(&active, &header)? {
                overlay.put_peer_set(&next)?;
                rotations += 1;
                info!(
                    chain_id,
                    height,
                    version = next.version,
                    count = next.len(),
                    "[rc-hs] Consensus peer set rotated"
                );
            }
        }

        overlay.commit()?;
        Ok(rotations)
    }

    fn msgs<S: KeyValueStore>(
        &self,
        store: &mut S,
        chain_id: ChainId,
        raw_msgs: &[Vec<u8>],
    ) -> Result<(), HeaderSyncError> {
        let mut overlay = StateOverlay::new(store);

        for raw in raw_msgs {
            let msg: CrossChainMsg = self.decode_untrusted(raw, "cross-chain msg")?;
            let height = msg.height;
            if msg.chain_id != chain_id {
                return Err(HeaderSyncError::MalformedInput(format!(
                    "message for chain {} submitted under chain {chain_id}",
                    msg.chain_id
                )));
            }

            if overlay.has_cross_chain_msg(chain_id, height)? {
                return Err(HeaderSyncError::AlreadySynced {
                    chain_id,
                    position: height,
                    kind: RecordKind::CrossChainMsg,
                });
            }

            let no_peer_set = || {
                HeaderSyncError::verification(chain_id, height, VerificationFailure::NoActivePeerSet)
            };
            let synced = overlay.current_height(chain_id)?.ok_or_else(no_peer_set)?;
            check_msg_height(height, synced)
                .map_err(|reason| HeaderSyncError::verification(chain_id, height, reason))?;
            let peer_set = overlay
                .peer_set_at_height(chain_id, height)?
                .ok_or_else(no_peer_set)?;
            let signers = verify_cross_chain_msg(&msg, &peer_set)
                .map_err(|reason| HeaderSyncError::verification(chain_id, height, reason))?;

            overlay.put_cross_chain_msg(&msg)?;
            debug!(
                chain_id,
                height,
                signers,
                version = peer_set.version,
                "[rc-hs] Cross-chain msg verified"
            );
        }

        overlay.commit()?;
        Ok(())
    }

    fn reject(
        &self,
        method: SyncMethod,
        chain_id: Option<ChainId>,
        err: HeaderSyncError,
    ) -> HeaderSyncError {
        metrics::record_rejection(err.kind());
        warn!(
            method = method.name(),
            chain_id,
            kind = err.kind(),
            "[rc-hs] Call rejected: {}",
            err
        );
        err
    }
}

impl<P: PeerSetPolicy> HeaderSyncApi for HeaderSyncService<P> {
    fn sync_genesis_header<C: InvocationContext>(
        &self,
        ctx: &mut C,
    ) -> Result<(), HeaderSyncError> {
        let method = SyncMethod::SyncGenesisHeader;
        let params: SyncGenesisHeaderParam = self
            .decode_untrusted(ctx.input(), "params")
            .map_err(|e| self.reject(method, None, e))?;
        let chain_id = params.chain_id;

        if !ctx.check_witness(self.operator.address()) {
            return Err(self.reject(
                method,
                Some(chain_id),
                HeaderSyncError::PermissionDenied(format!(
                    "invocation not witnessed by operator {}",
                    hex::encode(self.operator.address())
                )),
            ));
        }

        let result = self
            .decode_untrusted::<BlockHeader>(&params.genesis_header, "genesis header")
            .and_then(|header| self.genesis(ctx.store(), chain_id, &header));
        match result {
            Ok(peer_set) => {
                metrics::record_genesis_synced();
                info!(
                    chain_id,
                    version = peer_set.version,
                    count = peer_set.len(),
                    threshold = peer_set.threshold,
                    "[rc-hs] Genesis header synced"
                );
                Ok(())
            }
            Err(e) => Err(self.reject(method, Some(chain_id), e)),
        }
    }

    fn sync_block_header<C: InvocationContext>(&self, ctx: &mut C) -> Result<(), HeaderSyncError> {
        let method = SyncMethod::SyncBlockHeader;
        let params: SyncBlockHeaderParam = self
            .decode_untrusted(ctx.input(), "params")
            .map_err(|e| self.reject(method, None, e))?;
        let chain_id = params.chain_id;
        let count = params.headers.len();

        let result = invariant_batch_size(count, self.config.max_headers_per_call, "headers")
            .and_then(|()| self.headers(ctx.store(), chain_id, &params.headers));
        match result {
            Ok(rotations) => {
                metrics::record_headers_synced(count as u64, rotations);
                info!(chain_id, count, rotations, "[rc-hs] Block headers synced");
                Ok(())
            }
            Err(e) => Err(self.reject(method, Some(chain_id), e)),
        }
    }

    fn sync_cross_chain_msg<C: InvocationContext>(
        &self,
        ctx: &mut C,
    ) -> Result<(), HeaderSyncError> {
        let method = SyncMethod::SyncCrossChainMsg;
        let params: SyncCrossChainMsgParam = self
            .decode_untrusted(ctx.input(), "params")
            .map_err(|e| self.reject(method, None, e))?;
        let chain_id = params.chain_id;
        let count = params.cross_chain_msgs.len();

        let result = invariant_batch_size(count, self.config.max_msgs_per_call, "messages")
            .and_then(|()| self.msgs(ctx.store(), chain_id, &params.cross_chain_msgs));
        match result {
            Ok(()) => {
                metrics::record_cross_chain_msgs_synced(count as u64);
                info!(chain_id, count, "[rc-hs] Cross-chain msgs synced");
                Ok(())
            }
            Err(e) => Err(self.reject(method, Some(chain_id), e)),
        }
    }
}

impl<P: PeerSetPolicy> HeaderSyncQuery for HeaderSyncService<P> {
    fn header_by_height<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<BlockHeader>, HeaderSyncError> {
        store.header(chain_id, height)
    }

    fn header_by_hash<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        hash: &Hash,
    ) -> Result<Option<BlockHeader>, HeaderSyncError> {
        match store.header_height_by_hash(chain_id, hash)? {
            Some(height) => store.header(chain_id, height),
            None => Ok(None),
        }
    }

    fn current_height<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
    ) -> Result<Option<u64>, HeaderSyncError> {
        ChainStateStore::current_height(store, chain_id)
    }

    fn consensus_peer_set_at<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        store.peer_set_at_height(chain_id, height)
    }

    fn latest_consensus_peer_set<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
    ) -> Result<Option<ConsensusPeerSet>, HeaderSyncError> {
        store.latest_peer_set(chain_id)
    }

    fn cross_chain_msg<S: KeyValueStore>(
        &self,
        store: &S,
        chain_id: ChainId,
        height: u64,
    ) -> Result<Option<CrossChainMsg>, HeaderSyncError> {
        ChainStateStore::cross_chain_msg(store, chain_id, height)
    }
}
