//! # Request Params
//!
//! Decoded input of each entry point, and dispatch by host method name.

use crate::domain::{ChainId, HeaderSyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input of `syncGenesisHeader`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncGenesisHeaderParam {
    /// Chain being bootstrapped.
    pub chain_id: ChainId,
    /// Encoded genesis `BlockHeader`.
    pub genesis_header: Vec<u8>,
}

/// Input of `syncBlockHeader`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncBlockHeaderParam {
    /// Chain the headers belong to.
    pub chain_id: ChainId,
    /// Encoded `BlockHeader`s in processing order.
    pub headers: Vec<Vec<u8>>,
}

/// Input of `syncCrossChainMsg`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCrossChainMsgParam {
    /// Chain the messages come from.
    pub chain_id: ChainId,
    /// Encoded `CrossChainMsg`s in processing order.
    pub cross_chain_msgs: Vec<Vec<u8>>,
}

/// Host-visible entry point names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMethod {
    /// `syncGenesisHeader`
    SyncGenesisHeader,
    /// `syncBlockHeader`
    SyncBlockHeader,
    /// `syncCrossChainMsg`
    SyncCrossChainMsg,
}

impl SyncMethod {
    /// Name the host dispatches on.
    pub fn name(&self) -> &'static str {
        match self {
            SyncMethod::SyncGenesisHeader => "syncGenesisHeader",
            SyncMethod::SyncBlockHeader => "syncBlockHeader",
            SyncMethod::SyncCrossChainMsg => "syncCrossChainMsg",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyncMethod {
    type Err = HeaderSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syncGenesisHeader" => Ok(SyncMethod::SyncGenesisHeader),
            "syncBlockHeader" => Ok(SyncMethod::SyncBlockHeader),
            "syncCrossChainMsg" => Ok(SyncMethod::SyncCrossChainMsg),
            other => Err(HeaderSyncError::MalformedInput(format!(
                "unknown method `{other}`"
            ))),
        }
    }
}
