//! Credentials management for D-Link smart plugs.
//!
//! This module provides the [`Credentials`] struct holding the login the
//! plug expects during the HNAP handshake. Plugs ship with the username
//! `admin` and a PIN printed on the device label as password.
//!
//! # Security
//!
//! Passwords are stored using [`SecretString`] from the `secrecy` crate to prevent
//! accidental logging or display. Use [`Credentials::expose_password()`] to access
//! the raw password value when needed for key derivation.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Username every W215/W110 plug accepts out of the box.
pub const DEFAULT_USERNAME: &str = "admin";

/// Credentials for authenticating with a plug.
///
/// # Example
///
/// ```
/// use w215_core::Credentials;
///
/// let creds = Credentials::new("admin", "123456");
/// assert_eq!(creds.username, "admin");
///
/// // Shorthand for the factory username
/// let creds = Credentials::admin("123456");
/// assert_eq!(creds.expose_password(), "123456");
/// ```
#[derive(Clone)]
pub struct Credentials {
    /// The login name sent in the `Username` element.
    pub username: String,
    /// The device PIN (protected from accidental logging).
    password: SecretString,
}

impl Credentials {
    /// Creates new credentials with the given username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Creates credentials for the factory `admin` user.
    pub fn admin(password: impl Into<String>) -> Self {
        Self::new(DEFAULT_USERNAME, password)
    }

    /// Exposes the password for key derivation.
    ///
    /// Never log or display the returned value.
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for Credentials {}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
