//! Core library for communicating with D-Link W215/W110 smart plugs.
//!
//! The plugs speak HNAP (Home Network Administration Protocol): SOAP 1.1
//! envelopes posted to `/HNAP1/`, authenticated with an HMAC-MD5 challenge
//! handshake and signed per action.
//!
//! # Example
//!
//! ```no_run
//! use w215_core::{DeviceConfig, SmartPlug};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), w215_core::Error> {
//!     let config = DeviceConfig::new("192.168.0.10", "123456");
//!     let mut plug = SmartPlug::connect(config).await?;
//!
//!     let state = plug.state().await;
//!     println!("{:?} is {}", plug.model_name(), state);
//!     println!("temperature: {}", plug.temperature().await);
//!     Ok(())
//! }
//! ```
//!
//! # Protocol Details
//!
//! 1. A `Login` action with `<Action>request</Action>` returns a
//!    `Challenge`, a `Cookie` and a `PublicKey`.
//! 2. The private key is `HMAC-MD5(PublicKey + password, Challenge)` in
//!    upper-case hex; the login proof is `HMAC-MD5(private key, Challenge)`.
//! 3. A second `Login` with `<Action>login</Action>` submits the proof and
//!    must answer `success`.
//! 4. Every later action carries `HNAP_AUTH: <signature> <timestamp>` where
//!    the signature is `HMAC-MD5(private key, timestamp + SOAPAction)`, and
//!    `Cookie: uid=<cookie>`.
//!
//! Older firmware ("legacy" mode) keeps the session between calls, needs an
//! extra `<Controller>` element when switching, and reports power draw
//! through a plain-text status page instead of HNAP.

pub mod channel;
pub mod client;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod response;
pub mod session;
pub mod soap;
pub mod transport;

pub use channel::{Channel, ChannelMap};
pub use client::SmartPlug;
pub use credentials::Credentials;
pub use error::Error;
pub use response::{DeviceInfo, PlugState, Reading};
pub use transport::{DEFAULT_TIMEOUT, DeviceConfig, HttpTransport, ProtocolMode, Transport};

/// The version of the w215-core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
