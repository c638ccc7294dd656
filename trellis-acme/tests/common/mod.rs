// Not every suite uses every fixture helper.
#![allow(dead_code)]

pub mod harness;

pub use harness::{
    Envelope, TestAuthority, TestVerifier, envelope_for_account, envelope_for_embedded_key,
};
