//! Storage trait and its error surface.

use std::error::Error as StdError;

use async_trait::async_trait;
use thiserror::Error;

/// Error surfaced by a storage backend.
///
/// Backends describe the failure in the message and may attach their
/// native error as a source for downstream inspection. The account store
/// wraps this with the name of the operation that failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StorageError {
    /// Create an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping a backend-native failure.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Async key-value storage consumed by the account store.
///
/// Paths are opaque strings; the account store derives them from account
/// key identifiers under a fixed namespace prefix. Implementations must
/// provide read-your-writes consistency and are shared across concurrent
/// requests, so they must be `Send + Sync`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the bytes stored at `path`, or `None` if nothing is stored there.
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` at `path`, overwriting any existing entry.
    async fn put(&self, path: &str, value: &[u8]) -> Result<(), StorageError>;
}
