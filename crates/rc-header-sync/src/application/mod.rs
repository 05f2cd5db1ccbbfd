//! # Application Layer
//!
//! Request params, method dispatch and the service.

pub mod params;
pub mod service;

pub use params::{SyncBlockHeaderParam, SyncCrossChainMsgParam, SyncGenesisHeaderParam, SyncMethod};
pub use service::HeaderSyncService;
