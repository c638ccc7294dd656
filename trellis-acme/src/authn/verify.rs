//! Signed-envelope authentication.
//!
//! The per-request pipeline, in order:
//!
//! 1. base64url-decode the `protected` field and have the JWS layer parse
//!    it into a [`crate::jws::ProtectedHeader`].
//! 2. Resolve the signer to key material: an embedded key is used as-is, a
//!    key-identifier reference is loaded through the account store.
//! 3. Redeem the claimed nonce: after the signer is known, before any
//!    signature work. Every resolvable request spends its nonce exactly
//!    once whether or not verification then succeeds, so a rejected
//!    signature cannot be retried against the same nonce to probe the
//!    verifier, and the cost an attacker can impose with garbage
//!    signatures is bounded at one nonce-table operation per fresh nonce.
//! 4. Hand the compact form to the JWS layer for verification against the
//!    resolved key, yielding the payload claims.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::account::AccountStore;
use crate::jws::{Claims, JwsVerifier, SignerKey};
use crate::nonce::NonceManager;
use crate::storage::Storage;

use super::SignerContext;
use super::error::AuthnError;

/// Authenticates inbound signed envelopes.
///
/// Wires the nonce manager, the account store, and the external JWS
/// verifier into the single authentication path. One instance serves all
/// request tasks.
pub struct RequestAuthenticator<S, V> {
    nonces: Arc<NonceManager>,
    accounts: Arc<AccountStore<S>>,
    verifier: V,
}

impl<S: Storage, V: JwsVerifier> RequestAuthenticator<S, V> {
    /// Create an authenticator over shared components.
    pub fn new(nonces: Arc<NonceManager>, accounts: Arc<AccountStore<S>>, verifier: V) -> Self {
        Self {
            nonces,
            accounts,
            verifier,
        }
    }

    /// Authenticate one signed envelope, consuming its nonce.
    ///
    /// `protected_b64`, `payload_b64`, and `signature_b64` are the three
    /// request fields exactly as they came off the wire. On success the
    /// caller receives the resolved [`SignerContext`] plus the verified
    /// payload [`Claims`].
    ///
    /// # Errors
    ///
    /// - [`AuthnError::Malformed`]: undecodable protected field, header
    ///   rejected by the JWS layer, or a signer that cannot be resolved to
    ///   non-empty key material.
    /// - [`AuthnError::InvalidNonce`]: nonce absent, reused, or expired;
    ///   distinct so clients know to fetch a fresh nonce and retry.
    /// - [`AuthnError::Signature`]: the JWS layer rejected the signature.
    pub async fn authenticate(
        &self,
        protected_b64: &str,
        payload_b64: &str,
        signature_b64: &str,
    ) -> Result<(SignerContext, Claims), AuthnError> {
        let protected = URL_SAFE_NO_PAD
            .decode(protected_b64)
            .map_err(|e| AuthnError::Malformed(format!("undecodable protected field: {e}")))?;

        let header = self
            .verifier
            .parse_protected(&protected)
            .map_err(|e| AuthnError::Malformed(format!("unparseable protected header: {e}")))?;

        let key_material = match &header.signer {
            SignerKey::Embedded(jwk) => jwk.clone(),
            SignerKey::KeyId(kid) => self
                .accounts
                .load_key_material(kid)
                .await
                .map_err(|e| AuthnError::Malformed(format!("unresolvable signer: {e}")))?,
        };
        if key_material.is_empty() {
            return Err(AuthnError::Malformed(
                "signer resolved to empty key material".to_string(),
            ));
        }

        // The nonce is spent before the signature is examined; see module
        // docs for why this order is load-bearing.
        if !self.nonces.redeem(&header.nonce) {
            tracing::debug!("rejected envelope with invalid or reused nonce");
            return Err(AuthnError::InvalidNonce);
        }

        let compact = format!("{protected_b64}.{payload_b64}.{signature_b64}");
        let claims = self
            .verifier
            .verify_compact(&compact, &key_material)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected envelope with bad signature");
                AuthnError::Signature(e)
            })?;

        tracing::debug!(
            kid = header.signer.key_id().unwrap_or("<embedded>"),
            "authenticated envelope"
        );
        Ok((SignerContext::new(header, key_material), claims))
    }
}
