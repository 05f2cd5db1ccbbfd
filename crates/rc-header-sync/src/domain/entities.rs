//! # Domain Entities
//!
//! Records persisted per side-chain: headers, consensus peer set versions and
//! cross-chain message bundles. All three are write-once.

use super::errors::{ChainId, Hash};
use super::value_objects::{QuorumRule, SignatureEntry};
use serde::{Deserialize, Serialize};
use shared_crypto::{PublicKey, Sha256Hasher};

/// Domain tag of the header digest.
pub const HEADER_DIGEST_TAG: &str = "rc-header-sync/header/v1";

/// Domain tag of the cross-chain message digest.
pub const MSG_DIGEST_TAG: &str = "rc-header-sync/cross-chain-msg/v1";

/// Feed a key list into a digest: count, then scheme byte and key per entry.
pub(crate) fn hash_keys(hasher: &mut Sha256Hasher, keys: &[PublicKey]) {
    hasher.update(&(keys.len() as u64).to_le_bytes());
    for key in keys {
        hasher.update(&[key.scheme_id()]);
        hasher.update(key.as_bytes());
    }
}

/// Side-chain block header as submitted by relayers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block height.
    pub height: u64,
    /// Digest of the header at `height - 1`. Ignored at genesis.
    pub previous_hash: Hash,
    /// Opaque signed content.
    pub payload: Vec<u8>,
    /// Next consensus peer set, present only on epoch-change headers.
    pub embedded_peer_set: Option<Vec<PublicKey>>,
    /// Signatures over [`BlockHeader::digest`].
    pub signatures: Vec<SignatureEntry>,
}

impl BlockHeader {
    /// Create an unsigned header.
    pub fn new(height: u64, previous_hash: Hash, payload: Vec<u8>) -> Self {
        Self {
            height,
            previous_hash,
            payload,
            embedded_peer_set: None,
            signatures: Vec::new(),
        }
    }

    /// Attach an epoch-change peer set.
    pub fn with_peer_set(mut self, signers: Vec<PublicKey>) -> Self {
        self.embedded_peer_set = Some(signers);
        self
    }

    /// Digest that signers sign and that the next header links to.
    ///
    /// Covers every field except `signatures`.
    pub fn digest(&self) -> Hash {
        let mut hasher = Sha256Hasher::tagged(HEADER_DIGEST_TAG);
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&self.previous_hash);
        hasher.update(&(self.payload.len() as u64).to_le_bytes());
        hasher.update(&self.payload);
        match &self.embedded_peer_set {
            None => {
                hasher.update(&[0]);
            }
            Some(keys) => {
                hasher.update(&[1]);
                hash_keys(&mut hasher, keys);
            }
        }
        hasher.finalize()
    }

    /// Whether this header rotates the peer set.
    pub fn is_epoch_change(&self) -> bool {
        self.embedded_peer_set.is_some()
    }
}

/// One immutable version of a chain's authorized signer set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsensusPeerSet {
    /// Owning chain.
    pub chain_id: ChainId,
    /// Version, 0 for the genesis set.
    pub version: u64,
    /// Height of the header that introduced this version.
    pub introduced_at: u64,
    /// Authorized signers in header order.
    pub signers: Vec<PublicKey>,
    /// Minimum distinct valid signers.
    pub threshold: u32,
}

impl ConsensusPeerSet {
    /// Build a version, computing the threshold with `rule`.
    pub fn new(
        chain_id: ChainId,
        version: u64,
        introduced_at: u64,
        signers: Vec<PublicKey>,
        rule: QuorumRule,
    ) -> Self {
        let threshold = rule.threshold(signers.len()) as u32;
        Self {
            chain_id,
            version,
            introduced_at,
            signers,
            threshold,
        }
    }

    /// Whether `key` is an authorized signer.
    pub fn contains(&self, key: &PublicKey) -> bool {
        self.signers.contains(key)
    }

    /// Number of signers.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// True if the set has no signers.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

/// Cross-chain message bundle carried by a validated side-chain block.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrossChainMsg {
    /// Source chain.
    pub chain_id: ChainId,
    /// Height of the block carrying the message.
    pub height: u64,
    /// Opaque message bytes.
    pub content: Vec<u8>,
    /// Signatures over [`CrossChainMsg::digest`] by the peer set active at `height`.
    pub signatures: Vec<SignatureEntry>,
}

impl CrossChainMsg {
    /// Create an unsigned message.
    pub fn new(chain_id: ChainId, height: u64, content: Vec<u8>) -> Self {
        Self {
            chain_id,
            height,
            content,
            signatures: Vec::new(),
        }
    }

    /// Digest that signers sign.
    ///
    /// Binds the source chain, so a bundle cannot be replayed under another
    /// chain whose peer set shares keys.
    pub fn digest(&self) -> Hash {
        let mut hasher = Sha256Hasher::tagged(MSG_DIGEST_TAG);
        hasher.update(&self.chain_id.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&(self.content.len() as u64).to_le_bytes());
        hasher.update(&self.content);
        hasher.finalize()
    }
}
