//! In-memory key-value store for tests and embedding hosts.

use crate::ports::outbound::{BatchOperation, KVStoreError, KeyValueStore};
use std::collections::BTreeMap;

/// In-memory key-value store.
///
/// Batch writes are applied as a unit. Failures can be injected to exercise
/// storage error paths, and every mutating call is counted.
#[derive(Default, Debug, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    write_calls: usize,
}

impl InMemoryKVStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of `put` / `atomic_batch_write` calls received, including failed ones.
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy of the stored contents.
    pub fn snapshot(&self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.data.clone()
    }

    fn check_read(&self) -> Result<(), KVStoreError> {
        if self.fail_reads {
            return Err(KVStoreError::IOError {
                message: "injected read failure".to_string(),
            });
        }
        Ok(())
    }

    fn check_write(&mut self) -> Result<(), KVStoreError> {
        self.write_calls += 1;
        if self.fail_writes {
            return Err(KVStoreError::IOError {
                message: "injected write failure".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.check_read()?;
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check_write()?;
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.check_read()?;
        Ok(self.data.contains_key(key))
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.check_write()?;
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
            }
        }
        Ok(())
    }
}
