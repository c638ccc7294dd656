//! Request authentication.
//!
//! Turns a raw signed envelope (the `protected`/`payload`/`signature`
//! triple) into verified claims bound to a resolved signer, spending a
//! single-use nonce along the way. See [`RequestAuthenticator`] for the
//! pipeline and [`SignerContext`] for what a successful authentication
//! yields.

mod context;
mod error;
mod verify;

pub use context::SignerContext;
pub use error::AuthnError;
pub use verify::RequestAuthenticator;
