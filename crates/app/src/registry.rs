//! Entity registry — per-device, per-channel live state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use aquahub_domain::channel::ChannelDescriptor;
use aquahub_domain::device::{Device, DeviceKey};
use aquahub_domain::entity::{Entity, EntityChange};
use aquahub_domain::time::now;
use aquahub_domain::value::ChannelValue;

/// Owns every entity, partitioned by device.
///
/// Single-writer by construction: all mutation flows through
/// [`observe`](Self::observe), and the caller serializes calls per device,
/// so no internal locking exists.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: HashMap<DeviceKey, HashMap<&'static str, Entity>>,
}

impl EntityRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one decoded observation.
    ///
    /// Creates the entity on first observation — seeding its enabled flag
    /// from the channel's category — and overwrites the value on every
    /// later one, last write winning by arrival order. Returns the change
    /// notification for the platform boundary; one is produced per call
    /// even when the value is unchanged.
    pub fn observe(
        &mut self,
        device: &Device,
        channel: &'static ChannelDescriptor,
        value: ChannelValue,
    ) -> EntityChange {
        let at = now();
        let per_device = self.entities.entry(device.key.clone()).or_default();
        let (entity, created) = match per_device.entry(channel.id) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => {
                tracing::info!(
                    device = %device.identifier,
                    channel = channel.id,
                    category = %channel.category,
                    enabled = channel.default_enabled(),
                    "entity created"
                );
                (entry.insert(Entity::new(channel, at)), true)
            }
        };
        entity.update(value.clone(), at);

        EntityChange {
            device: device.identifier.clone(),
            channel: channel.id,
            value,
            enabled: entity.enabled,
            created,
            at,
        }
    }

    /// Current state of one entity, or `None` when the pair has not been
    /// observed yet — a normal outcome, not an error.
    #[must_use]
    pub fn get(&self, device: &DeviceKey, channel_id: &str) -> Option<&Entity> {
        self.entities.get(device)?.get(channel_id)
    }

    /// Total number of entities across all devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.values().map(HashMap::len).sum()
    }

    /// Whether no entity has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.values().all(HashMap::is_empty)
    }
}
