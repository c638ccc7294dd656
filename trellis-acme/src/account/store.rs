//! Durable account records over the storage collaborator.

use crate::storage::Storage;

use super::error::AccountError;
use super::record::{Account, AccountStatus};

/// Storage namespace holding one document per account.
const ACCOUNT_PREFIX: &str = "acme/accounts/";

/// Creates, persists, and loads [`Account`] records.
///
/// Holds nothing but the backend handle, so it is cheap to share behind an
/// `Arc` across request tasks. Consistency is delegated entirely to the
/// backend: with read-your-writes storage, an account registered by one
/// request is visible to the next.
#[derive(Debug)]
pub struct AccountStore<S> {
    storage: S,
}

impl<S: Storage> AccountStore<S> {
    /// Create a store over the given backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Register a new account under `key_id`; status starts at
    /// [`AccountStatus::Valid`], the only initial state an account can
    /// have.
    ///
    /// Writes are idempotent overwrites; there is no pre-existence check.
    /// Callers that need create-once semantics check
    /// [`Self::account_exists`] first.
    pub async fn create_account(
        &self,
        key_id: &str,
        contact: Vec<String>,
        terms_agreed: bool,
        key_material: Vec<u8>,
    ) -> Result<Account, AccountError> {
        let account = Account {
            key_id: key_id.to_string(),
            status: AccountStatus::Valid,
            contact,
            terms_agreed,
            key_material,
        };
        self.write(&account).await?;
        tracing::debug!(kid = %account.key_id, "created account");
        Ok(account)
    }

    /// Persist changes to an existing record at its derived path.
    ///
    /// Status and contact transitions are decided by account-management
    /// workflows above this crate; this is their write primitive.
    pub async fn update_account(&self, account: &Account) -> Result<(), AccountError> {
        self.write(account).await?;
        tracing::debug!(kid = %account.key_id, status = %account.status, "updated account");
        Ok(())
    }

    /// Load the record for `key_id`.
    ///
    /// The identifier is normalized to its final `/`-separated segment
    /// first, so a fully qualified path-like identifier and a bare one
    /// resolve to the same record. Absence is [`AccountError::NotFound`],
    /// kept distinct from backend failures so callers can map it to the
    /// right protocol response.
    pub async fn load_account(&self, key_id: &str) -> Result<Account, AccountError> {
        let kid = clean_key_id(key_id);
        let path = account_path(kid);
        let bytes = self
            .storage
            .get(&path)
            .await
            .map_err(|source| AccountError::Storage {
                op: "get",
                path: path.clone(),
                source,
            })?
            .ok_or_else(|| AccountError::NotFound(kid.to_string()))?;

        let mut account: Account =
            serde_json::from_slice(&bytes).map_err(|source| AccountError::Decode {
                kid: kid.to_string(),
                source,
            })?;
        account.key_id = kid.to_string();
        Ok(account)
    }

    /// True iff [`Self::load_account`] succeeds.
    pub async fn account_exists(&self, key_id: &str) -> bool {
        self.load_account(key_id).await.is_ok()
    }

    /// Load just the key material for `key_id`.
    pub async fn load_key_material(&self, key_id: &str) -> Result<Vec<u8>, AccountError> {
        let account = self.load_account(key_id).await?;
        if account.key_material.is_empty() {
            return Err(AccountError::MissingKeyMaterial {
                kid: account.key_id,
            });
        }
        Ok(account.key_material)
    }

    async fn write(&self, account: &Account) -> Result<(), AccountError> {
        let path = account_path(&account.key_id);
        let bytes = serde_json::to_vec(account).map_err(|source| AccountError::Encode {
            kid: account.key_id.clone(),
            source,
        })?;
        self.storage
            .put(&path, &bytes)
            .await
            .map_err(|source| AccountError::Storage {
                op: "put",
                path,
                source,
            })
    }
}

/// Final path segment of a possibly path-qualified key identifier.
fn clean_key_id(key_id: &str) -> &str {
    key_id.rsplit_once('/').map_or(key_id, |(_, last)| last)
}

fn account_path(kid: &str) -> String {
    format!("{ACCOUNT_PREFIX}{kid}")
}
