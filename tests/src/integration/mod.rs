//! # Integration Flows
//!
//! A [`Relay`] plays both host and relayer: it owns the state store and
//! submits encoded calls through method-name dispatch, as a host would.

pub mod header_flows;

use rc_header_sync::test_utils::{
    genesis_param, headers_param, msgs_param, operator_config, TestInvocation,
};
use rc_header_sync::{
    BlockHeader, ChainId, CrossChainMsg, HeaderSyncError, HeaderSyncService, InMemoryKVStore,
    SyncMethod,
};
use shared_crypto::KeyPair;

/// Host + relayer harness around one service and one store.
pub struct Relay {
    /// Service under test.
    pub service: HeaderSyncService,
    /// Host state.
    pub store: InMemoryKVStore,
}

impl Relay {
    /// Service whose operator derives from `bookkeepers`.
    pub fn new(bookkeepers: &[KeyPair]) -> Self {
        rc_telemetry::init_test_logging();
        let service = match HeaderSyncService::new(operator_config(bookkeepers)) {
            Ok(service) => service,
            Err(e) => panic!("test config rejected: {e}"),
        };
        Self {
            service,
            store: InMemoryKVStore::new(),
        }
    }

    /// Run `method` with `input`, witnessed by the operator when `as_operator`.
    pub fn call(
        &mut self,
        method: SyncMethod,
        input: Vec<u8>,
        as_operator: bool,
    ) -> Result<(), HeaderSyncError> {
        let mut ctx = TestInvocation::new(std::mem::take(&mut self.store), input);
        if as_operator {
            ctx = ctx.with_witness(*self.service.operator().address());
        }
        let result = self.service.invoke(method.name(), &mut ctx);
        self.store = ctx.into_store();
        result
    }

    /// Operator-submitted genesis sync.
    pub fn genesis(&mut self, chain_id: ChainId, header: &BlockHeader) -> Result<(), HeaderSyncError> {
        self.call(
            SyncMethod::SyncGenesisHeader,
            genesis_param(chain_id, header),
            true,
        )
    }

    /// Relayer-submitted header batch.
    pub fn headers(
        &mut self,
        chain_id: ChainId,
        headers: &[BlockHeader],
    ) -> Result<(), HeaderSyncError> {
        self.call(
            SyncMethod::SyncBlockHeader,
            headers_param(chain_id, headers),
            false,
        )
    }

    /// Relayer-submitted message batch.
    pub fn msgs(&mut self, chain_id: ChainId, msgs: &[CrossChainMsg]) -> Result<(), HeaderSyncError> {
        self.call(
            SyncMethod::SyncCrossChainMsg,
            msgs_param(chain_id, msgs),
            false,
        )
    }
}
