//! Cryptographic utilities for HNAP device communication.
//!
//! - [`hnap`]: HMAC-MD5 challenge-response key derivation and action signing

pub mod hnap;

pub use hnap::{derive_login_proof, derive_private_key, hnap_auth, sign_action};
