//! HTTP transport for D-Link smart plugs.
//!
//! Plugs run a minimal embedded web server. Requests go out over HTTP/1.1
//! with title-case header names (`Soapaction`, `Hnap_auth`), which is the
//! form the firmware has been observed to accept from every client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::Error,
    transport::{Headers, Transport},
};

/// Transport that POSTs to `http://<host><path>` with `reqwest`.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use w215_core::transport::{HttpTransport, Transport, STATUS_PATH};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let transport = HttpTransport::new("192.168.0.10", Duration::from_secs(10))?;
///     let status = transport
///         .post(STATUS_PATH, &[], "request=create_chklst".to_string())
///         .await?;
///     println!("{}", status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    host: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for `host` (an IP or hostname, optionally `host:port`).
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let host = host.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .http1_title_case_headers()
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: format!("http://{}", host),
            host,
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, headers: &Headers, body: String) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, bytes = body.len(), "sending request");

        let mut request = self.client.post(&url).body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn host(&self) -> &str {
        &self.host
    }
}
