//! In-process storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Storage, StorageError};

/// In-memory [`Storage`] implementation.
///
/// Entries live for the lifetime of the process and operations never fail.
/// Used by the test suites; also a reasonable backend for development
/// servers that do not need accounts to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (for tests and monitoring).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.read().await.get(path).cloned())
    }

    async fn put(&self, path: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(path.to_string(), value.to_vec());
        Ok(())
    }
}
