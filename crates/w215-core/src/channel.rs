//! Module ids addressing the functions of a plug.
//!
//! Every metering or switching action carries a `<ModuleID>` telling the
//! plug which of its internal modules should answer. One hardware revision
//! numbers the power meter and thermal sensor the other way round.

use serde::Serialize;

/// Hardware revision reporting the power meter and thermal sensor swapped.
pub const ALTERNATE_HARDWARE_VERSION: &str = "B1";

/// Logical function of the plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    /// The relay.
    Switch,
    /// Power and energy metering.
    PowerMeter,
    /// Internal temperature sensor.
    Thermal,
}

/// Channel → module id table, fixed for the lifetime of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMap {
    /// Switch 1, power meter 2, thermal 3.
    #[default]
    Default,
    /// Switch 1, power meter 3, thermal 2.
    Alternate,
}

impl ChannelMap {
    /// Picks the table for a probed hardware version.
    ///
    /// Unknown or missing versions use [`ChannelMap::Default`].
    ///
    /// ```
    /// use w215_core::channel::{Channel, ChannelMap};
    ///
    /// let map = ChannelMap::for_hardware_version(Some("b1"));
    /// assert_eq!(map.module_id(Channel::PowerMeter), 3);
    /// assert_eq!(ChannelMap::for_hardware_version(None), ChannelMap::Default);
    /// ```
    pub fn for_hardware_version(version: Option<&str>) -> Self {
        match version {
            Some(v) if v.trim().eq_ignore_ascii_case(ALTERNATE_HARDWARE_VERSION) => {
                ChannelMap::Alternate
            }
            _ => ChannelMap::Default,
        }
    }

    /// Returns the module id for `channel`.
    pub fn module_id(self, channel: Channel) -> u8 {
        match (self, channel) {
            (_, Channel::Switch) => 1,
            (ChannelMap::Default, Channel::PowerMeter) => 2,
            (ChannelMap::Default, Channel::Thermal) => 3,
            (ChannelMap::Alternate, Channel::PowerMeter) => 3,
            (ChannelMap::Alternate, Channel::Thermal) => 2,
        }
    }
}
