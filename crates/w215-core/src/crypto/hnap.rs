//! HMAC-MD5 key derivation and request signing for the HNAP handshake.
//!
//! The login is a two-round challenge-response:
//!
//! 1. The device hands out a `PublicKey`, a `Challenge` and a `Cookie`.
//! 2. The client derives `PrivateKey = HMAC-MD5(PublicKey ‖ password, Challenge)`
//!    and proves knowledge of it with `HMAC-MD5(PrivateKey, Challenge)`.
//!
//! Every later action is signed with the private key over the timestamp and
//! the quoted action URL. All digests travel as upper-case hex.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use md5::Md5;

use crate::soap::HNAP_NAMESPACE;

type HmacMd5 = Hmac<Md5>;

/// Computes an upper-case hex HMAC-MD5 digest.
fn hmac_md5_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacMd5::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(message);
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Derives the session signing key from the device challenge and the password.
///
/// # Example
///
/// ```
/// use w215_core::crypto::hnap::derive_private_key;
///
/// let key = derive_private_key("PUBKEY123", "CHALLENGE456", "secret");
/// assert_eq!(key.len(), 32);
/// assert_eq!(key, key.to_uppercase());
/// ```
pub fn derive_private_key(public_key: &str, challenge: &str, password: &str) -> String {
    let key = format!("{}{}", public_key, password);
    hmac_md5_hex(key.as_bytes(), challenge.as_bytes())
}

/// Derives the login proof sent as `LoginPassword` in the second login round.
pub fn derive_login_proof(private_key: &str, challenge: &str) -> String {
    hmac_md5_hex(private_key.as_bytes(), challenge.as_bytes())
}

/// Returns the quoted action URL, exactly as it appears in the `SOAPAction` header.
pub fn action_url(action: &str) -> String {
    format!("\"{}{}\"", HNAP_NAMESPACE, action)
}

/// Signs an action: `HMAC-MD5(private_key, timestamp ‖ "\"<namespace><action>\"")`.
pub fn sign_action(private_key: &str, timestamp: u64, action: &str) -> String {
    let message = format!("{}{}", timestamp, action_url(action));
    hmac_md5_hex(private_key.as_bytes(), message.as_bytes())
}

/// Builds the `HNAP_AUTH` header value: `"<SIGNATURE> <timestamp>"`.
pub fn hnap_auth(private_key: &str, timestamp: u64, action: &str) -> String {
    format!("{} {}", sign_action(private_key, timestamp, action), timestamp)
}

/// Coarse request timestamp: Unix seconds divided by 10^6, rounded.
///
/// Plugs do not check the value against their clock.
pub fn timestamp() -> u64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    timestamp_from_secs(secs)
}

fn timestamp_from_secs(secs: f64) -> u64 {
    (secs / 1e6).round() as u64
}
