//! # Domain Value Objects
//!
//! Immutable value types for header sync: signature entries, the quorum
//! rule, the operator identity and the storage key schema.

use super::errors::{Address, ChainId, Hash};
use serde::{Deserialize, Serialize};
use shared_crypto::{tagged_sha256, PublicKey, Signature};

/// Domain tag for operator identity derivation.
pub const OPERATOR_TAG: &str = "rc-header-sync/operator/v1";

/// One (public key, signature) pair of a signature set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Claimed signer.
    pub public_key: PublicKey,
    /// Signature over the record digest.
    pub signature: Signature,
}

impl SignatureEntry {
    /// Create a new entry.
    pub fn new(public_key: PublicKey, signature: Signature) -> Self {
        Self {
            public_key,
            signature,
        }
    }
}

/// Rule computing a peer set's signer threshold from its size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumRule {
    /// `n - (n-1)/3`: tolerates `f` faulty signers out of `3f+1`.
    #[default]
    Byzantine,
    /// `n/2 + 1`.
    Majority,
    /// Every signer.
    All,
}

impl QuorumRule {
    /// Minimum distinct signers for a set of `signer_count` keys.
    pub fn threshold(&self, signer_count: usize) -> usize {
        if signer_count == 0 {
            return 0;
        }
        match self {
            QuorumRule::Byzantine => signer_count - (signer_count - 1) / 3,
            QuorumRule::Majority => signer_count / 2 + 1,
            QuorumRule::All => signer_count,
        }
    }
}

/// Bootstrap authority allowed to run genesis sync.
///
/// Derived from the home chain's genesis bookkeepers: the address commits to
/// the sorted key set and its Byzantine threshold, so any reordering of the
/// configured keys yields the same identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorIdentity(Address);

impl OperatorIdentity {
    /// Derive from the bookkeeper key set.
    pub fn from_bookkeepers(bookkeepers: &[PublicKey]) -> Self {
        let mut keys = bookkeepers.to_vec();
        keys.sort();
        keys.dedup();

        let threshold = QuorumRule::Byzantine.threshold(keys.len()) as u32;
        let mut preimage = threshold.to_le_bytes().to_vec();
        for key in &keys {
            preimage.push(key.scheme_id());
            preimage.extend_from_slice(key.as_bytes());
        }

        let digest = tagged_sha256(OPERATOR_TAG, &preimage);
        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[..20]);
        Self(address)
    }

    /// The address the host's witness check must confirm.
    pub fn address(&self) -> &Address {
        &self.0
    }
}

/// Storage key prefixes.
///
/// Integers are appended big-endian so keys of one chain sort by height or
/// version under a prefix scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `hs:header:{chain}{height}` -> BlockHeader
    Header,
    /// `hs:header-hash:{chain}{digest}` -> height
    HeaderByHash,
    /// `hs:current-height:{chain}` -> height
    CurrentHeight,
    /// `hs:peer-set:{chain}{version}` -> ConsensusPeerSet
    PeerSet,
    /// `hs:peer-set-head:{chain}` -> latest version
    PeerSetHead,
    /// `hs:cross-chain-msg:{chain}{height}` -> CrossChainMsg
    CrossChainMsg,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Header => b"hs:header:",
            KeyPrefix::HeaderByHash => b"hs:header-hash:",
            KeyPrefix::CurrentHeight => b"hs:current-height:",
            KeyPrefix::PeerSet => b"hs:peer-set:",
            KeyPrefix::PeerSetHead => b"hs:peer-set-head:",
            KeyPrefix::CrossChainMsg => b"hs:cross-chain-msg:",
        }
    }

    /// Build a key for one chain with the given suffix.
    pub fn key(&self, chain_id: ChainId, suffix: &[u8]) -> Vec<u8> {
        let prefix = self.as_bytes();
        let mut key = Vec::with_capacity(prefix.len() + 8 + suffix.len());
        key.extend_from_slice(prefix);
        key.extend_from_slice(&chain_id.to_be_bytes());
        key.extend_from_slice(suffix);
        key
    }

    /// `header(chain, height)`.
    pub fn header_key(chain_id: ChainId, height: u64) -> Vec<u8> {
        KeyPrefix::Header.key(chain_id, &height.to_be_bytes())
    }

    /// `headerByHash(chain, digest)`.
    pub fn header_hash_key(chain_id: ChainId, hash: &Hash) -> Vec<u8> {
        KeyPrefix::HeaderByHash.key(chain_id, hash)
    }

    /// `currentHeight(chain)`.
    pub fn current_height_key(chain_id: ChainId) -> Vec<u8> {
        KeyPrefix::CurrentHeight.key(chain_id, &[])
    }

    /// `peerSet(chain, version)`.
    pub fn peer_set_key(chain_id: ChainId, version: u64) -> Vec<u8> {
        KeyPrefix::PeerSet.key(chain_id, &version.to_be_bytes())
    }

    /// `peerSetHead(chain)`.
    pub fn peer_set_head_key(chain_id: ChainId) -> Vec<u8> {
        KeyPrefix::PeerSetHead.key(chain_id, &[])
    }

    /// `crossChainMsg(chain, height)`.
    pub fn cross_chain_msg_key(chain_id: ChainId, height: u64) -> Vec<u8> {
        KeyPrefix::CrossChainMsg.key(chain_id, &height.to_be_bytes())
    }
}
