//! Decoded protected-header types.

/// The signing key designated by a request's protected header.
///
/// A request identifies its signer in exactly one of two ways: new-account
/// registration embeds the public key itself, while every later request
/// references the key identifier assigned at registration. The two cases
/// never mix in a well-formed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerKey {
    /// Self-contained public key material, presented at registration.
    Embedded(Vec<u8>),
    /// Key identifier of an already-registered account.
    KeyId(String),
}

impl SignerKey {
    /// The referenced account key identifier, if this is a reference.
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        match self {
            SignerKey::KeyId(kid) => Some(kid),
            SignerKey::Embedded(_) => None,
        }
    }

    /// True when the header carries its own key material.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, SignerKey::Embedded(_))
    }
}

/// Protected header of a signed envelope, produced by the JWS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedHeader {
    /// Signature algorithm declared by the client.
    pub alg: String,
    /// Single-use anti-replay token claimed by this request.
    pub nonce: String,
    /// Who signed: an embedded key or an account reference.
    pub signer: SignerKey,
}
