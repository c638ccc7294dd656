//! Shared fixture for the end-to-end suites.
//!
//! [`TestAuthority`] wires the full trust core over in-memory
//! collaborators: `MemoryStorage` for accounts, a real `NonceManager`, and
//! [`TestVerifier`] standing in for the JOSE layer. The stand-in is
//! deterministic (a signature is the SHA-256 digest of the signing input
//! concatenated with the key material), which keeps envelopes buildable in
//! one line while still making forged or mis-keyed signatures fail.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use sha2::{Digest, Sha256};

use trellis_acme::account::{Account, AccountStore};
use trellis_acme::authn::{AuthnError, RequestAuthenticator, SignerContext};
use trellis_acme::jws::{Claims, JwsError, JwsVerifier, ProtectedHeader, SignerKey};
use trellis_acme::nonce::NonceManager;
use trellis_acme::storage::MemoryStorage;

/// Deterministic JOSE stand-in.
///
/// Protected headers are plain JSON documents with `alg`, `nonce`, and
/// exactly one of `kid` (account reference) or `jwk` (base64url key
/// bytes). Signatures are `SHA-256(signing_input || key_material)`,
/// base64url-encoded.
pub struct TestVerifier;

impl TestVerifier {
    /// The signature [`TestVerifier`] accepts for this input and key.
    pub fn sign(signing_input: &str, key_material: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(signing_input.as_bytes());
        hasher.update(key_material);
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

impl JwsVerifier for TestVerifier {
    fn parse_protected(&self, raw: &[u8]) -> Result<ProtectedHeader, JwsError> {
        let value: serde_json::Value =
            serde_json::from_slice(raw).map_err(|e| JwsError::MalformedHeader(e.to_string()))?;
        let alg = value["alg"].as_str().unwrap_or_default().to_string();
        let nonce = value["nonce"].as_str().unwrap_or_default().to_string();
        let signer = match (value["kid"].as_str(), value["jwk"].as_str()) {
            (Some(kid), None) => SignerKey::KeyId(kid.to_string()),
            (None, Some(jwk)) => {
                let key = URL_SAFE_NO_PAD
                    .decode(jwk)
                    .map_err(|e| JwsError::MalformedHeader(e.to_string()))?;
                SignerKey::Embedded(key)
            }
            _ => {
                return Err(JwsError::MalformedHeader(
                    "need exactly one of kid or jwk".to_string(),
                ));
            }
        };
        Ok(ProtectedHeader { alg, nonce, signer })
    }

    fn verify_compact(&self, compact: &str, key_material: &[u8]) -> Result<Claims, JwsError> {
        let mut parts = compact.split('.');
        let (Some(protected), Some(payload), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(JwsError::MalformedPayload("not in compact form".to_string()));
        };

        let expected = Self::sign(&format!("{protected}.{payload}"), key_material);
        if signature != expected {
            return Err(JwsError::BadSignature);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| JwsError::MalformedPayload(e.to_string()))?;
        serde_json::from_slice(&payload).map_err(|e| JwsError::MalformedPayload(e.to_string()))
    }
}

/// The full trust core over in-memory collaborators.
pub struct TestAuthority {
    pub nonces: Arc<NonceManager>,
    pub accounts: Arc<AccountStore<MemoryStorage>>,
    pub authenticator: RequestAuthenticator<MemoryStorage, TestVerifier>,
}

impl TestAuthority {
    pub fn new() -> Self {
        Self::with_nonce_expiry(Duration::from_secs(15 * 60))
    }

    pub fn with_nonce_expiry(window: Duration) -> Self {
        let nonces = Arc::new(NonceManager::with_expiry(window));
        let accounts = Arc::new(AccountStore::new(MemoryStorage::new()));
        let authenticator =
            RequestAuthenticator::new(Arc::clone(&nonces), Arc::clone(&accounts), TestVerifier);
        Self {
            nonces,
            accounts,
            authenticator,
        }
    }

    /// Register an account under `kid` with `key` as its key material.
    pub async fn register_account(&self, kid: &str, key: &[u8]) -> Account {
        self.accounts
            .create_account(
                kid,
                vec!["mailto:admin@example.com".to_string()],
                true,
                key.to_vec(),
            )
            .await
            .expect("account creation over memory storage cannot fail")
    }

    /// Push one envelope through the authentication pipeline.
    pub async fn authenticate(
        &self,
        envelope: &Envelope,
    ) -> Result<(SignerContext, Claims), AuthnError> {
        self.authenticator
            .authenticate(&envelope.protected, &envelope.payload, &envelope.signature)
            .await
    }
}

/// A wire-ready signed envelope: three base64url fields.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub protected: String,
    pub payload: String,
    pub signature: String,
}

/// Build a correctly signed envelope referencing account `kid`.
///
/// Sign with a key other than the account's stored material to produce a
/// forged envelope.
pub fn envelope_for_account(
    nonce: &str,
    kid: &str,
    signing_key: &[u8],
    claims: serde_json::Value,
) -> Envelope {
    let protected =
        URL_SAFE_NO_PAD.encode(json!({"alg": "ES256", "nonce": nonce, "kid": kid}).to_string());
    seal(protected, signing_key, claims)
}

/// Build a correctly signed registration envelope embedding `key`.
pub fn envelope_for_embedded_key(nonce: &str, key: &[u8], claims: serde_json::Value) -> Envelope {
    let protected = URL_SAFE_NO_PAD.encode(
        json!({"alg": "ES256", "nonce": nonce, "jwk": URL_SAFE_NO_PAD.encode(key)}).to_string(),
    );
    seal(protected, key, claims)
}

fn seal(protected: String, signing_key: &[u8], claims: serde_json::Value) -> Envelope {
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signature = TestVerifier::sign(&format!("{protected}.{payload}"), signing_key);
    Envelope {
        protected,
        payload,
        signature,
    }
}
