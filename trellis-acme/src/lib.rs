//! Trust-establishment core for an ACME-style certificate service.
//!
//! Everything a mutating request must pass before any issuance logic runs
//! lives here, composed bottom-up from three components:
//!
//! - [`nonce::NonceManager`]: single-use, time-bounded anti-replay tokens
//!   in a lock-free in-memory table.
//! - [`account::AccountStore`]: durable account records over an injected
//!   storage backend.
//! - [`authn::RequestAuthenticator`]: the per-request pipeline that parses
//!   the protected header, resolves the signer to key material, spends the
//!   claimed nonce, verifies the signature, and yields the payload claims.
//!
//! The crate performs no I/O of its own beyond the injected seams:
//! persistence goes through [`storage::Storage`] and signature
//! cryptography through [`jws::JwsVerifier`], so the embedding service
//! picks its storage engine and JOSE stack. HTTP routing, issuance
//! workflows, and maintenance scheduling all sit above this crate.
//!
//! # Nonce lifecycle
//!
//! ```
//! use trellis_acme::nonce::NonceManager;
//!
//! let nonces = NonceManager::new();
//! let (token, _expires_at) = nonces.issue()?;
//!
//! // first redemption wins, the token is spent
//! assert!(nonces.redeem(&token));
//! assert!(!nonces.redeem(&token));
//! # Ok::<(), trellis_acme::nonce::NonceError>(())
//! ```

pub mod account;
pub mod authn;
pub mod jws;
pub mod nonce;
pub mod storage;

pub use account::{Account, AccountError, AccountStatus, AccountStore};
pub use authn::{AuthnError, RequestAuthenticator, SignerContext};
pub use jws::{Claims, JwsError, JwsVerifier, ProtectedHeader, SignerKey};
pub use nonce::{DEFAULT_NONCE_EXPIRY, NonceError, NonceManager};
pub use storage::{MemoryStorage, Storage, StorageError};
