//! # Outbound Ports
//!
//! What header sync needs from its host: the invocation's input bytes, a
//! witness check and a key-value state store.

use crate::domain::{Address, HeaderSyncError};
use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError {
        /// Backend message
        message: String,
    },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError {
        /// Backend message
        message: String,
    },
}

impl From<KVStoreError> for HeaderSyncError {
    fn from(err: KVStoreError) -> Self {
        HeaderSyncError::StorageError(err.to_string())
    }
}

/// Abstract interface for the host's key-value state.
///
/// Records are write-once, so the port has no delete.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either every operation is applied or none is.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key
        key: Vec<u8>,
        /// Value
        value: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One host invocation of a header-sync entry point.
pub trait InvocationContext {
    /// Host state store.
    type Store: KeyValueStore;

    /// Raw input bytes of the invocation.
    fn input(&self) -> &[u8];

    /// Whether the invocation is authorized by `address`.
    fn check_witness(&self, address: &Address) -> bool;

    /// State store of the invocation.
    fn store(&mut self) -> &mut Self::Store;
}
