//! Verified signer context.

use crate::jws::ProtectedHeader;

/// Proof that an envelope passed authentication, carrying the resolved
/// signer.
///
/// Can only be minted by the success path of
/// [`crate::authn::RequestAuthenticator::authenticate`] (the constructor is
/// crate-private), so holding one means header parsing, nonce redemption,
/// and signature verification all succeeded for this request. Transient:
/// produced per request, never retained.
#[derive(Debug, Clone)]
pub struct SignerContext {
    header: ProtectedHeader,
    key_material: Vec<u8>,
}

impl SignerContext {
    pub(crate) fn new(header: ProtectedHeader, key_material: Vec<u8>) -> Self {
        Self {
            header,
            key_material,
        }
    }

    /// The account key identifier, when the request referenced one.
    ///
    /// `None` for registration requests, which embed their key instead;
    /// the registration workflow assigns an identifier afterwards.
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.header.signer.key_id()
    }

    /// The key material the signature verified under.
    #[must_use]
    pub fn key_material(&self) -> &[u8] {
        &self.key_material
    }

    /// The nonce this request consumed.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.header.nonce
    }

    /// The decoded protected header.
    #[must_use]
    pub fn header(&self) -> &ProtectedHeader {
        &self.header
    }

    /// True for registration requests carrying an embedded key.
    #[must_use]
    pub fn is_registration(&self) -> bool {
        self.header.signer.is_embedded()
    }

    /// Consume the context, yielding the key material.
    ///
    /// The registration workflow uses this to persist the embedded key as
    /// the new account's key material without copying.
    #[must_use]
    pub fn into_key_material(self) -> Vec<u8> {
        self.key_material
    }
}
