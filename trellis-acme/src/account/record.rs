//! Account record model.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered account.
///
/// Transitions run valid -> deactivated/revoked and are driven by the
/// account-management workflows above this crate; nothing here re-checks
/// the transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// In good standing; requests signed by the account key are accepted.
    Valid,
    /// Deactivated at the holder's request.
    Deactivated,
    /// Revoked by the service.
    Revoked,
}

impl AccountStatus {
    /// Protocol wire name of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Valid => "valid",
            AccountStatus::Deactivated => "deactivated",
            AccountStatus::Revoked => "revoked",
        }
    }

    /// True while the account may authenticate requests.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, AccountStatus::Valid)
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered caller identity.
///
/// Serialized as one JSON document per account. `key_id` is derived from
/// the storage path on load and never written into the document itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Lookup identifier, globally unique and immutable once created.
    #[serde(skip)]
    pub key_id: String,
    /// Lifecycle status; new accounts always start valid.
    #[serde(rename = "state")]
    pub status: AccountStatus,
    /// Contact URIs supplied at registration.
    pub contact: Vec<String>,
    /// Whether the holder accepted the terms of service.
    #[serde(rename = "termsOfServiceAgreed")]
    pub terms_agreed: bool,
    /// Raw public-key material; format owned by the JWS layer.
    #[serde(rename = "jwk", with = "key_material_b64")]
    pub key_material: Vec<u8>,
}

/// Key bytes travel base64-encoded (standard alphabet) inside the JSON
/// document.
mod key_material_b64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
