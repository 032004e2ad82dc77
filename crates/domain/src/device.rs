//! Devices — one physical heat pump per topic qualifier.

use crate::time::Timestamp;

/// Identity of a device on the bus, taken from the topic's device segment.
///
/// The implicit default device (unqualified topics) is a separate variant
/// rather than a reserved name, so a unit publishing under a literal
/// `default` qualifier can never alias it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceKey {
    /// The implicit device behind unqualified topics.
    Default,
    /// A device behind an explicit qualifier segment.
    Named(String),
}

impl DeviceKey {
    /// Key for an explicitly-qualified device.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The qualifier as text (`default` for the implicit device).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Named(name) => name,
        }
    }
}

impl std::fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical heat pump observed on the bus.
///
/// Created the first time any message arrives under its qualifier; never
/// destroyed, since the bus carries no removal signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Bus identity.
    pub key: DeviceKey,
    /// Platform-facing identifier, derived from the topic prefix so it is
    /// stable across restarts.
    pub identifier: String,
    /// When the first message for this device was observed.
    pub first_seen: Timestamp,
}

impl Device {
    /// Derive a device from its key and the configured topic prefix.
    #[must_use]
    pub fn new(key: DeviceKey, prefix: &str, first_seen: Timestamp) -> Self {
        let identifier = match &key {
            DeviceKey::Default => prefix.to_owned(),
            DeviceKey::Named(name) => format!("{prefix}_{name}"),
        };
        Self {
            key,
            identifier,
            first_seen,
        }
    }
}
