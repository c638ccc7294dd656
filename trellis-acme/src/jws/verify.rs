//! Signature verification capability.

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use super::ProtectedHeader;

/// Claims decoded from a verified request payload.
pub type Claims = Map<String, Value>;

/// Errors reported by a [`JwsVerifier`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum JwsError {
    /// The protected-header bytes are not a valid header document.
    #[error("malformed protected header: {0}")]
    MalformedHeader(String),
    /// The payload could not be decoded even though the signature held.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The signature does not verify under the provided key material.
    #[error("signature rejected")]
    BadSignature,
    /// The declared algorithm is not acceptable to the verifier.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Header parsing and signature verification, implemented by a JOSE layer
/// outside this crate.
///
/// # Contract
///
/// - `parse_protected` receives the raw (already base64url-decoded) bytes
///   of the `protected` field and produces a [`ProtectedHeader`] whose
///   signer designation is exactly one of embedded key or key-identifier
///   reference. A header carrying both or neither is malformed.
/// - `verify_compact` receives the compact form
///   `protected.payload.signature` (each part still base64url, joined
///   verbatim from the request fields) together with the key material
///   resolved for the signer, and returns the decoded payload claims only
///   if the signature verifies.
/// - Implementations must not consult shared mutable state: replay
///   protection runs before verification and is not the verifier's concern.
///
/// One verifier instance is shared across concurrent authentication
/// requests, hence the `Send + Sync` bound.
pub trait JwsVerifier: Send + Sync {
    /// Decode raw protected-header bytes into a structured header.
    fn parse_protected(&self, raw: &[u8]) -> Result<ProtectedHeader, JwsError>;

    /// Verify `compact` against `key_material` and return the payload claims.
    fn verify_compact(&self, compact: &str, key_material: &[u8]) -> Result<Claims, JwsError>;
}
