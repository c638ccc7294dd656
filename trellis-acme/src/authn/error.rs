//! Authentication error types.

use thiserror::Error;

use crate::jws::JwsError;

/// Errors from authenticating a signed envelope.
///
/// The kinds are deliberate protocol surface: [`AuthnError::InvalidNonce`]
/// tells a client "fetch a fresh nonce and retry", while
/// [`AuthnError::Malformed`] means the request itself is broken and
/// resending it unchanged cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AuthnError {
    /// A required field is missing or undecodable, or the claimed signer
    /// cannot be resolved to non-empty key material.
    #[error("malformed request: {0}")]
    Malformed(String),
    /// The claimed nonce was absent, already redeemed, or expired.
    #[error("invalid or reused nonce")]
    InvalidNonce,
    /// The signature did not verify under the resolved key material.
    #[error("signature verification failed")]
    Signature(#[source] JwsError),
}
