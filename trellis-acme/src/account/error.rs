//! Account store error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from account persistence and lookup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    /// No record exists for the requested key identifier.
    #[error("account not found: {0}")]
    NotFound(String),
    /// The stored bytes are not a valid account document.
    #[error("malformed account entry for {kid}")]
    Decode {
        kid: String,
        #[source]
        source: serde_json::Error,
    },
    /// The stored record carries no key material. A well-formed account
    /// always has key material once created, so this marks the entry
    /// malformed rather than the caller unauthorized.
    #[error("account entry for {kid} has no key material")]
    MissingKeyMaterial { kid: String },
    /// The record could not be serialized for writing.
    #[error("failed to encode account record for {kid}")]
    Encode {
        kid: String,
        #[source]
        source: serde_json::Error,
    },
    /// The storage collaborator failed; `op` names the failing call.
    #[error("storage {op} failed at {path}")]
    Storage {
        op: &'static str,
        path: String,
        #[source]
        source: StorageError,
    },
}
