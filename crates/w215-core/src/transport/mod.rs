//! Transport layer for communicating with D-Link smart plugs.
//!
//! Every exchange with a plug is a single HTTP POST with a raw body and a
//! handful of custom headers, against one of two fixed paths:
//!
//! - [`HNAP_PATH`]: SOAP actions, including the login handshake
//! - [`STATUS_PATH`]: plain-text status page used by legacy firmware
//!
//! [`HttpTransport`] talks to a real device. The [`Transport`] trait is the
//! seam used to put something else behind a [`SmartPlug`](crate::SmartPlug).

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Credentials, error::Error};

/// Default timeout for transport operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the HNAP SOAP endpoint.
pub const HNAP_PATH: &str = "/HNAP1/";

/// Path of the legacy plain-text status endpoint.
pub const STATUS_PATH: &str = "/my_cgi.cgi";

/// Request headers as `(name, value)` pairs, sent in order.
pub type Headers = [(&'static str, String)];

/// Firmware dialect spoken by a plug.
///
/// Chosen once when the client is built; it decides both the shape of the
/// `SetSocketSettings` parameters and whether a session outlives a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProtocolMode {
    /// Current firmware: fresh login for every action.
    #[default]
    Current,
    /// Older firmware: extra control fields, cached session, `my_cgi.cgi` telemetry.
    Legacy,
}

impl ProtocolMode {
    /// Returns `true` if a session may be reused across calls.
    pub fn caches_session(self) -> bool {
        self == ProtocolMode::Legacy
    }
}

impl std::fmt::Display for ProtocolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolMode::Current => write!(f, "current"),
            ProtocolMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// Configuration for connecting to a plug.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// The device hostname or IP address, optionally with a port.
    pub host: String,
    /// Login used for the HNAP handshake.
    pub credentials: Credentials,
    /// Firmware dialect.
    pub mode: ProtocolMode,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
}

impl DeviceConfig {
    /// Creates a configuration for the factory `admin` user.
    ///
    /// ```
    /// use w215_core::DeviceConfig;
    ///
    /// let config = DeviceConfig::new("192.168.0.10", "123456").with_legacy_protocol(true);
    /// assert_eq!(config.base_url(), "http://192.168.0.10/HNAP1/");
    /// assert_eq!(config.credentials.username, "admin");
    /// ```
    pub fn new(host: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            credentials: Credentials::admin(password),
            mode: ProtocolMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the username, keeping the password.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.credentials.username = username.into();
        self
    }

    /// Replaces the full set of credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Switches to the legacy firmware dialect.
    pub fn with_legacy_protocol(mut self, legacy: bool) -> Self {
        self.mode = if legacy {
            ProtocolMode::Legacy
        } else {
            ProtocolMode::Current
        };
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the HNAP endpoint for this device.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.host, HNAP_PATH)
    }
}

/// Trait for device transports.
///
/// Implementations must map connection problems, timeouts and non-success
/// HTTP statuses to [`Error::ConnectionFailed`], [`Error::Timeout`] and
/// [`Error::HttpStatus`]; those are the faults the client retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `path` on the device and returns the response body.
    async fn post(&self, path: &str, headers: &Headers, body: String) -> Result<String, Error>;

    /// Returns the device host.
    fn host(&self) -> &str;
}
