//! Multi-device coordinator — maps topic qualifiers to device instances.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use aquahub_domain::device::{Device, DeviceKey};
use aquahub_domain::time::now;

/// Lazily creates and hands out [`Device`]s, one per topic qualifier.
///
/// Two distinct qualifiers never alias to the same device, and the implicit
/// default device stays distinct from every named one. Devices are never
/// destroyed; the bus carries no removal signal.
#[derive(Debug)]
pub struct DeviceCoordinator {
    prefix: String,
    devices: HashMap<DeviceKey, Device>,
}

impl DeviceCoordinator {
    /// Coordinator for the given topic prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            devices: HashMap::new(),
        }
    }

    /// The device behind `key`, created on first sight.
    pub fn resolve(&mut self, key: DeviceKey) -> &Device {
        match self.devices.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let device = Device::new(entry.key().clone(), &self.prefix, now());
                tracing::info!(device = %device.identifier, "device discovered");
                entry.insert(device)
            }
        }
    }

    /// The device behind `key`, if it has been seen.
    #[must_use]
    pub fn get(&self, key: &DeviceKey) -> Option<&Device> {
        self.devices.get(key)
    }

    /// Number of devices seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
