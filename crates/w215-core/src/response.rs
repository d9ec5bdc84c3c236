//! Typed values decoded from plug responses.
//!
//! The plug answers with bare strings; this module turns them into
//! [`PlugState`], [`Reading`] and the legacy status map.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Serialize, Serializer};
use tracing::error;

use crate::{channel::ChannelMap, error::Error, transport::ProtocolMode};

/// Relay state of a plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugState {
    /// Relay closed.
    On,
    /// Relay open.
    Off,
    /// The plug could not be asked or gave an unexpected answer.
    Unknown,
}

impl PlugState {
    /// Maps an `OPStatus` value (`true`/`false`, any case).
    pub fn from_op_status(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("true") {
            Some(PlugState::On)
        } else if value.eq_ignore_ascii_case("false") {
            Some(PlugState::Off)
        } else {
            None
        }
    }
}

impl fmt::Display for PlugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlugState::On => write!(f, "ON"),
            PlugState::Off => write!(f, "OFF"),
            PlugState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Parses a requested state. Only `ON` and `OFF` (any case) are accepted.
///
/// ```
/// use w215_core::PlugState;
///
/// assert_eq!("on".parse::<PlugState>().unwrap(), PlugState::On);
/// assert!("maybe".parse::<PlugState>().is_err());
/// ```
impl FromStr for PlugState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("on") {
            Ok(PlugState::On)
        } else if s.eq_ignore_ascii_case("off") {
            Ok(PlugState::Off)
        } else {
            Err(Error::InvalidArgument(format!("state {:?} is not valid", s)))
        }
    }
}

impl Serialize for PlugState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A best-effort telemetry value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Numeric value as reported by the plug.
    Value(f64),
    /// The value could not be obtained; displayed as `N/A`.
    Unavailable,
}

impl Reading {
    /// Converts a raw response into a reading.
    ///
    /// Absent values are unavailable. Non-numeric text is logged as an error
    /// against `what` and is also unavailable.
    pub fn from_response(raw: Option<&str>, what: &str) -> Self {
        let Some(raw) = raw else {
            return Reading::Unavailable;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) => Reading::Value(value),
            Err(e) => {
                error!(value = %raw, error = %e, "failed to retrieve {} from smart plug", what);
                Reading::Unavailable
            }
        }
    }

    /// Returns the value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }

    /// Returns `true` for [`Reading::Unavailable`].
    pub fn is_unavailable(self) -> bool {
        self == Reading::Unavailable
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{}", v),
            Reading::Unavailable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => serializer.serialize_f64(*v),
            Reading::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// What the client learned about the plug while connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Host the client talks to.
    pub host: String,
    /// `ModelName` from `GetDeviceSettings`.
    pub model_name: Option<String>,
    /// `HardwareVersion` from `GetDeviceSettings`.
    pub hardware_version: Option<String>,
    /// Firmware dialect in use.
    pub protocol: ProtocolMode,
    /// Active module id table.
    pub channel_map: ChannelMap,
}

/// Parses the `key: value` lines of the legacy status page.
///
/// Each line is split on its first colon and both halves are trimmed.
/// Lines without a colon are ignored.
///
/// ```
/// use w215_core::response::parse_status_lines;
///
/// let status = parse_status_lines("Meter Watt: 12.5\nTime: 10:42\n");
/// assert_eq!(status["Meter Watt"], "12.5");
/// assert_eq!(status["Time"], "10:42");
/// ```
pub fn parse_status_lines(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
