//! Durable key-value storage boundary.
//!
//! The trust core does not own a persistence engine. Account records are
//! written through [`Storage`], a minimal async key-value seam the embedding
//! service implements over whatever engine it actually runs. The core
//! assumes read-your-writes consistency: a record written by `put` must be
//! visible to an immediately following `get`, because authentication loads
//! accounts that may have been registered by the previous request.
//!
//! [`MemoryStorage`] is the in-process implementation used by the test
//! suites and suitable for development servers.

mod backend;
mod memory;

pub use backend::{Storage, StorageError};
pub use memory::MemoryStorage;
