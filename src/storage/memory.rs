//! In-memory medium for tests and embedding

use std::collections::HashMap;
use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};
use super::medium::Medium;

/// Medium backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys holding a blob.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Medium for MemoryMedium {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StorageError::unavailable_no_source("memory medium lock poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StorageError::unavailable_no_source("memory medium lock poisoned"))?;
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
