//! # Domain Errors
//!
//! Error taxonomy of the header-sync service. Every entry point returns one
//! of these kinds; the host maps any of them to transaction rejection.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Hash type alias (32-byte SHA-256)
pub type Hash = [u8; 32];

/// Address type alias (20-byte identity)
pub type Address = [u8; 20];

/// Side-chain identifier on the relay chain.
pub type ChainId = u64;

/// Record kinds kept per chain, used to qualify duplicate rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// Block header.
    Header,
    /// Consensus peer set version.
    PeerSet,
    /// Cross-chain message bundle.
    CrossChainMsg,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RecordKind::Header => "header",
            RecordKind::PeerSet => "peer set",
            RecordKind::CrossChainMsg => "cross-chain msg",
        })
    }
}

/// Why a header or message failed authenticity checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    /// The chain has no consensus peer set (genesis never synced).
    #[error("no consensus peer set for chain")]
    NoActivePeerSet,

    /// No stored header at `height - 1`.
    #[error("parent header at height {parent_height} not synced")]
    ParentNotFound {
        /// Height of the missing parent
        parent_height: u64,
    },

    /// `previous_hash` does not match the stored parent digest.
    #[error("previous hash mismatch: expected {}, got {}", hex::encode(.expected), hex::encode(.got))]
    PreviousHashMismatch {
        /// Digest of the stored parent
        expected: Hash,
        /// Digest claimed by the header
        got: Hash,
    },

    /// A signature entry names a key outside the peer set.
    #[error("signer #{index} is not in consensus peer set v{version}")]
    UnauthorizedSigner {
        /// Position of the entry in the signature set
        index: usize,
        /// Peer set version checked against
        version: u64,
    },

    /// The same key signed twice.
    #[error("signer #{index} appears more than once")]
    DuplicateSigner {
        /// Position of the repeated entry
        index: usize,
    },

    /// Cryptographic verification of one entry failed.
    #[error("signature #{index} is invalid: {source}")]
    InvalidSignature {
        /// Position of the entry
        index: usize,
        /// Underlying crypto failure
        source: CryptoError,
    },

    /// Fewer valid signers than the peer set threshold.
    #[error("insufficient signatures: {got} < {required}")]
    InsufficientSignatures {
        /// Distinct valid signers
        got: usize,
        /// Peer set threshold
        required: usize,
    },

    /// Claimed height is above the chain's synced header height.
    #[error("height {height} is above synced height {synced}")]
    HeightNotSynced {
        /// Claimed height
        height: u64,
        /// Current synced header height
        synced: u64,
    },
}

impl VerificationFailure {
    /// True for linkage failures (as opposed to signature failures).
    pub fn is_linkage(&self) -> bool {
        matches!(
            self,
            VerificationFailure::ParentNotFound { .. } | VerificationFailure::PreviousHashMismatch { .. }
        )
    }
}

/// Header-sync error types.
#[derive(Debug, Error)]
pub enum HeaderSyncError {
    /// Untrusted bytes do not match the expected schema.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Witness check failed (genesis path only).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A record already exists at this position; records are write-once.
    #[error("{kind} already synced for chain {chain_id} at {position}")]
    AlreadySynced {
        /// Chain of the duplicate
        chain_id: ChainId,
        /// Height (headers, messages) or version (peer sets)
        position: u64,
        /// Which record collided
        kind: RecordKind,
    },

    /// Signature, threshold or linkage check failed.
    #[error("Verification failed for chain {chain_id} at height {height}: {reason}")]
    VerificationFailed {
        /// Chain being synced
        chain_id: ChainId,
        /// Height of the rejected item
        height: u64,
        /// Specific failure
        reason: VerificationFailure,
    },

    /// Signer list is empty, oversized or contains unusable keys.
    #[error("Invalid peer set: {0}")]
    InvalidPeerSet(String),

    /// Host store failure or corrupt stored record.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl HeaderSyncError {
    /// Stable label for hosts and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            HeaderSyncError::MalformedInput(_) => "malformed_input",
            HeaderSyncError::PermissionDenied(_) => "permission_denied",
            HeaderSyncError::AlreadySynced { .. } => "already_synced",
            HeaderSyncError::VerificationFailed { .. } => "verification_failed",
            HeaderSyncError::InvalidPeerSet(_) => "invalid_peer_set",
            HeaderSyncError::StorageError(_) => "storage_error",
        }
    }

    /// Build a `VerificationFailed` for an item.
    pub fn verification(chain_id: ChainId, height: u64, reason: VerificationFailure) -> Self {
        HeaderSyncError::VerificationFailed {
            chain_id,
            height,
            reason,
        }
    }
}
