//! # RC Header Sync
//!
//! Trust boundary through which the relay chain admits side-chain state:
//! block headers, the consensus peer sets that authenticate them, and
//! cross-chain messages carried in validated blocks.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Entry Points
//!
//! | Method | Input | Authorization | Effect |
//! |--------|-------|---------------|--------|
//! | `syncGenesisHeader` | chain id, genesis header | operator witness | header@0, peer set v0 |
//! | `syncBlockHeader` | chain id, headers | quorum of active peer set | N headers, ≤N peer set versions |
//! | `syncCrossChainMsg` | chain id, messages | quorum of peer set at claimed height | N messages |
//!
//! ## Guarantees
//!
//! - Records are write-once; resubmitting a height fails with `AlreadySynced`
//! - Every call is all-or-nothing: writes are buffered and committed in one
//!   atomic batch after the last item verifies
//! - Peer sets are versioned and looked up by height, so a message at an old
//!   height stays verifiable after rotations
//! - Deterministic: no clocks, randomness or hash-map iteration on any path
//!
//! ## Module Structure
//!
//! ```text
//! rc-header-sync/
//! ├── domain/          # Entities, value objects, errors, invariants
//! ├── algorithms/      # Quorum check, header/message verifiers, peer set policy
//! ├── ports/           # HeaderSyncApi + HeaderSyncQuery (inbound), host traits (outbound)
//! ├── adapters/        # In-memory store, write overlay, typed chain state
//! ├── application/     # Params, method dispatch, HeaderSyncService
//! ├── codec.rs         # Canonical bincode
//! ├── config.rs        # HeaderSyncConfig
//! └── metrics.rs       # Prometheus counters (feature `metrics`)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod codec;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
#[allow(missing_docs)]
pub mod test_utils;

// Re-exports
pub use adapters::{ChainStateStore, InMemoryKVStore, StateOverlay};
pub use algorithms::{
    check_msg_height, verify_cross_chain_msg, verify_header, verify_quorum,
    EmbeddedPeerSetPolicy, PeerSetPolicy,
};
pub use application::{
    HeaderSyncService, SyncBlockHeaderParam, SyncCrossChainMsgParam, SyncGenesisHeaderParam,
    SyncMethod,
};
pub use codec::CodecError;
pub use config::{ConfigError, HeaderSyncConfig};
pub use domain::{
    Address, BlockHeader, ChainId, ConsensusPeerSet, CrossChainMsg, Hash, HeaderSyncError,
    KeyPrefix, OperatorIdentity, QuorumRule, RecordKind, SignatureEntry, VerificationFailure,
    GENESIS_HEIGHT,
};
pub use ports::{
    BatchOperation, HeaderSyncApi, HeaderSyncQuery, InvocationContext, KVStoreError,
    KeyValueStore,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
