//! # State Overlay
//!
//! Write buffer that makes one entry-point call atomic. Reads see buffered
//! writes first, then the host store. Nothing reaches the host store until
//! [`StateOverlay::commit`], which flushes the buffer in a single
//! `atomic_batch_write`. Dropping the overlay discards the buffer.

use crate::ports::outbound::{BatchOperation, KVStoreError, KeyValueStore};
use std::collections::BTreeMap;

/// Buffered view over a host store for the duration of one call.
pub struct StateOverlay<'a, S: KeyValueStore> {
    base: &'a mut S,
    // BTreeMap: flush order is a function of the keys only.
    pending: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a, S: KeyValueStore> StateOverlay<'a, S> {
    /// Open an overlay over `base`.
    pub fn new(base: &'a mut S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Flush buffered writes in one atomic batch.
    ///
    /// An empty buffer issues no store call.
    pub fn commit(self) -> Result<usize, KVStoreError> {
        let count = self.pending.len();
        if count == 0 {
            return Ok(0);
        }
        let operations = self
            .pending
            .into_iter()
            .map(|(key, value)| BatchOperation::put(key, value))
            .collect();
        self.base.atomic_batch_write(operations)?;
        Ok(count)
    }
}

impl<S: KeyValueStore> KeyValueStore for StateOverlay<'_, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.pending.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.base.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.pending.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        if self.pending.contains_key(key) {
            return Ok(true);
        }
        self.base.exists(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.pending.insert(key, value);
                }
            }
        }
        Ok(())
    }
}
