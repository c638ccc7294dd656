//! Registered account identities.
//!
//! One durable record per account, keyed by the account's key identifier
//! and stored as a JSON document under the `acme/accounts/` namespace of
//! the storage collaborator. Records are created at registration, read on
//! every authenticated request thereafter, and mutated only by
//! account-management workflows above this crate; they are never physically
//! deleted here.

mod error;
mod record;
mod store;

pub use error::AccountError;
pub use record::{Account, AccountStatus};
pub use store::AccountStore;
