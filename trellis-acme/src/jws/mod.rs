//! JSON Web Signature boundary.
//!
//! Signed request envelopes arrive as three base64url fields (`protected`,
//! `payload`, `signature`). The cryptography that validates them, key
//! parsing and the signature algorithms themselves, lives outside this
//! crate and is consumed through [`JwsVerifier`]. The types here describe
//! what crosses that boundary: the decoded [`ProtectedHeader`] with its
//! [`SignerKey`] designation, and the [`Claims`] extracted from a verified
//! payload.

mod header;
mod verify;

pub use header::{ProtectedHeader, SignerKey};
pub use verify::{Claims, JwsError, JwsVerifier};
