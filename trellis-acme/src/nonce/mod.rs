//! Single-use anti-replay nonces.
//!
//! # Flow
//!
//! 1. A client asks for a nonce; [`NonceManager::issue`] hands out a fresh
//!    high-entropy token with a bounded lifetime.
//! 2. The client places the token in the protected header of its next
//!    signed request.
//! 3. Authentication redeems the token via [`NonceManager::redeem`]; the
//!    first redemption wins, and every later attempt (or any attempt after
//!    the expiry window) is rejected.
//! 4. Expired tokens that were never redeemed are dropped by the sweep
//!    ([`NonceManager::tidy`]), gated by the cheap
//!    [`NonceManager::maybe_tidy`] check.
//!
//! Nonces are deliberately process-local and never persisted: a restart
//! invalidates everything outstanding, which fails closed because clients
//! just fetch a fresh nonce and retry.

mod manager;

pub use manager::{DEFAULT_NONCE_EXPIRY, NonceError, NonceManager};
