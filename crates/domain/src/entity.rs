//! Entities — one channel's live state for one device.

use serde::Serialize;

use crate::channel::ChannelDescriptor;
use crate::time::Timestamp;
use crate::value::ChannelValue;

/// Live platform-facing state of one (device, channel) pair.
///
/// Created on the first inbound message for the pair and never deleted;
/// silence on the bus simply leaves the value stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// The catalog entry this entity instantiates.
    pub channel: &'static ChannelDescriptor,
    /// Latest decoded value. `None` only between creation and the first
    /// successful decode within the same observation.
    pub value: Option<ChannelValue>,
    /// When the last message arrived, regardless of whether the value
    /// changed.
    pub last_update: Timestamp,
    /// Visibility flag seeded from the channel's category at creation.
    /// Ownership of enablement after creation belongs to the platform;
    /// the engine never re-applies the default.
    pub enabled: bool,
}

impl Entity {
    /// A fresh entity with the category's default visibility and no value.
    #[must_use]
    pub fn new(channel: &'static ChannelDescriptor, at: Timestamp) -> Self {
        Self {
            channel,
            value: None,
            last_update: at,
            enabled: channel.default_enabled(),
        }
    }

    /// Overwrite the value with the latest observation and refresh the
    /// timestamp. Last write wins by arrival order; payloads carry no
    /// timestamps of their own.
    pub fn update(&mut self, value: ChannelValue, at: Timestamp) {
        self.value = Some(value);
        self.last_update = at;
    }
}

/// One element of the append-only change stream handed to the platform.
///
/// Emitted on every observation, value change or not, because a fresh
/// message is itself a liveness signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityChange {
    /// Stable device identifier.
    pub device: String,
    /// Channel id.
    pub channel: &'static str,
    /// The decoded value.
    pub value: ChannelValue,
    /// Whether the entity is enabled.
    pub enabled: bool,
    /// True on the observation that created the entity; the platform uses
    /// this to register it.
    pub created: bool,
    /// Arrival time of the observation.
    pub at: Timestamp,
}
