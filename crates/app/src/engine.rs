//! The engine — inbound pipeline and command façade.
//!
//! Inbound: parse → resolve device → decode → observe → notify, one message
//! processed to completion before the next. Outbound: validate → encode →
//! publish. Telemetry errors are recovered locally (the message is dropped
//! and logged); command errors are returned to the caller.

use aquahub_domain::catalog::Catalog;
use aquahub_domain::codec;
use aquahub_domain::device::DeviceKey;
use aquahub_domain::entity::{Entity, EntityChange};
use aquahub_domain::error::{CommandError, DecodeError, TopicError};
use aquahub_domain::topic::TopicScheme;
use aquahub_domain::value::ChannelValue;

use crate::coordinator::DeviceCoordinator;
use crate::dispatcher::CommandDispatcher;
use crate::ports::{ChangeListener, CommandSink};
use crate::registry::EntityRegistry;

/// Why an inbound message was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// The topic did not match the expected grammar.
    #[error(transparent)]
    Topic(#[from] TopicError),
    /// The payload could not be decoded for its channel.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The message-decoding and entity-synchronization engine.
///
/// Owns the device coordinator and entity registry; talks to the outside
/// world only through the [`ChangeListener`] and [`CommandSink`] ports.
pub struct Engine<L, S> {
    scheme: TopicScheme,
    catalog: Catalog,
    coordinator: DeviceCoordinator,
    registry: EntityRegistry,
    listener: L,
    dispatcher: CommandDispatcher<S>,
}

impl<L: ChangeListener, S: CommandSink> Engine<L, S> {
    /// Wire an engine from its collaborators.
    pub fn new(scheme: TopicScheme, catalog: Catalog, listener: L, sink: S) -> Self {
        let coordinator = DeviceCoordinator::new(scheme.prefix());
        let dispatcher = CommandDispatcher::new(catalog.clone(), scheme.clone(), sink);
        Self {
            scheme,
            catalog,
            coordinator,
            registry: EntityRegistry::new(),
            listener,
            dispatcher,
        }
    }

    /// Process one inbound message, recovering locally from anything that
    /// cannot be interpreted: the message is dropped, a diagnostic is
    /// logged, and processing continues with the next message.
    pub fn ingest(&mut self, topic: &str, payload: &str) {
        match self.try_ingest(topic, payload) {
            Ok(change) => {
                tracing::debug!(
                    device = %change.device,
                    channel = change.channel,
                    value = %change.value,
                    created = change.created,
                    "observation applied"
                );
            }
            // Our own published commands echo back through the wildcard
            // subscription; nothing to report.
            Err(IngestError::Topic(TopicError::CommandTopic)) => {
                tracing::trace!(topic, "command echo skipped");
            }
            Err(err) => {
                tracing::warn!(topic, payload, error = %err, "message dropped");
            }
        }
    }

    /// Same pipeline as [`ingest`](Self::ingest), surfacing the drop reason.
    ///
    /// A dropped message never touches entity state: no entity is created
    /// for an unknown channel or an undecodable payload, and existing
    /// entities keep their previous value. Device identity comes from the
    /// topic alone, so a well-formed topic registers its device even when
    /// the rest of the message is dropped.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] describing why the message was dropped.
    pub fn try_ingest(&mut self, topic: &str, payload: &str) -> Result<EntityChange, IngestError> {
        let parsed = self.scheme.parse(topic)?;
        let device = self.coordinator.resolve(parsed.device);

        let channel = self.catalog.lookup(parsed.channel)?;
        let value = codec::decode(channel, payload)?;

        let change = self.registry.observe(device, channel, value);
        self.listener.entity_changed(change.clone());
        Ok(change)
    }

    /// Validate, encode, and publish one command. Nothing is published on
    /// error; confirmation arrives later as ordinary telemetry.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for unknown, read-only, or out-of-domain
    /// commands.
    pub fn dispatch(
        &self,
        device: &DeviceKey,
        channel_id: &str,
        value: &ChannelValue,
    ) -> Result<(), CommandError> {
        self.dispatcher.send(device, channel_id, value)
    }

    /// Current state of one entity, or `None` when the (device, channel)
    /// pair has not been observed yet.
    #[must_use]
    pub fn entity(&self, device: &DeviceKey, channel_id: &str) -> Option<&Entity> {
        self.registry.get(device, channel_id)
    }

    /// The live entity registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The device coordinator.
    #[must_use]
    pub fn devices(&self) -> &DeviceCoordinator {
        &self.coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::ports::OutboundMessage;

    #[derive(Default)]
    struct RecordingListener(Mutex<Vec<EntityChange>>);

    impl ChangeListener for RecordingListener {
        fn entity_changed(&self, change: EntityChange) {
            self.0.lock().unwrap().push(change);
        }
    }

    impl RecordingListener {
        fn changes(&self) -> Vec<EntityChange> {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<OutboundMessage>>);

    impl CommandSink for RecordingSink {
        fn send(&self, message: OutboundMessage) {
            self.0.lock().unwrap().push(message);
        }
    }

    impl RecordingSink {
        fn messages(&self) -> Vec<OutboundMessage> {
            self.0.lock().unwrap().clone()
        }
    }

    fn engine<'a>(
        listener: &'a RecordingListener,
        sink: &'a RecordingSink,
    ) -> Engine<&'a RecordingListener, &'a RecordingSink> {
        Engine::new(TopicScheme::stock(), Catalog::builtin(), listener, sink)
    }

    fn multi_device_engine<'a>(
        listener: &'a RecordingListener,
        sink: &'a RecordingSink,
    ) -> Engine<&'a RecordingListener, &'a RecordingSink> {
        Engine::new(
            TopicScheme::new("panasonic_heat_pump", true),
            Catalog::builtin(),
            listener,
            sink,
        )
    }

    #[test]
    fn should_create_enabled_entity_for_core_setpoint() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest(
            "panasonic_heat_pump/main/Z1_Heat_Request_Temperature",
            "45",
        );

        let main = DeviceKey::named("main");
        let entity = engine.entity(&main, "Z1_Heat_Request_Temperature").unwrap();
        assert_eq!(entity.value, Some(ChannelValue::Numeric(45.0)));
        assert!(entity.enabled);

        let changes = listener.changes();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].created);
        assert!(changes[0].enabled);
        assert_eq!(changes[0].device, "panasonic_heat_pump_main");
    }

    #[test]
    fn should_create_disabled_entity_for_pool_channel() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/Pool_Temperature", "22");

        let entity = engine
            .entity(&DeviceKey::named("main"), "Pool_Temperature")
            .unwrap();
        assert_eq!(entity.value, Some(ChannelValue::Numeric(22.0)));
        assert!(!entity.enabled);
        assert!(!listener.changes()[0].enabled);
    }

    #[test]
    fn should_drop_malformed_topic_without_any_mutation() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/", "45");
        engine.ingest("panasonic_heat_pump", "45");
        engine.ingest("other_tree/main/Pool_Temperature", "22");

        assert!(engine.registry().is_empty());
        assert!(engine.devices().is_empty());
        assert!(listener.changes().is_empty());
    }

    #[test]
    fn should_drop_unknown_channel_without_creating_entity() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        let err = engine
            .try_ingest("panasonic_heat_pump/main/Bogus_Channel", "1")
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::Decode(DecodeError::UnknownChannel("Bogus_Channel".to_string()))
        );
        // The device is known from the topic alone; the entity is not.
        assert_eq!(engine.devices().len(), 1);
        assert!(engine.registry().is_empty());
        assert!(listener.changes().is_empty());
    }

    #[test]
    fn should_keep_previous_value_on_unknown_symbol() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);
        let main = DeviceKey::named("main");

        engine.ingest("panasonic_heat_pump/main/Operating_Mode_State", "0");
        engine.ingest("panasonic_heat_pump/main/Operating_Mode_State", "99");

        let entity = engine.entity(&main, "Operating_Mode_State").unwrap();
        assert_eq!(entity.value, Some(ChannelValue::Symbol("Heat")));
        assert_eq!(listener.changes().len(), 1);
    }

    #[test]
    fn should_reject_out_of_domain_reading_instead_of_clamping() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/DHW_Target_Temperature", "48");
        engine.ingest("panasonic_heat_pump/main/DHW_Target_Temperature", "990");

        let entity = engine
            .entity(&DeviceKey::named("main"), "DHW_Target_Temperature")
            .unwrap();
        assert_eq!(entity.value, Some(ChannelValue::Numeric(48.0)));
    }

    #[test]
    fn should_notify_on_every_observation_even_when_value_is_unchanged() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/Outside_Temperature", "7.5");
        engine.ingest("panasonic_heat_pump/main/Outside_Temperature", "7.5");

        let changes = listener.changes();
        assert_eq!(changes.len(), 2);
        assert!(changes[0].created);
        assert!(!changes[1].created);
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn should_keep_devices_with_distinct_qualifiers_distinct() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = multi_device_engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/Outside_Temperature", "7.5");
        engine.ingest("panasonic_heat_pump/garage/Outside_Temperature", "7.5");

        assert_eq!(engine.devices().len(), 2);
        assert_eq!(engine.registry().len(), 2);

        let changes = listener.changes();
        assert_ne!(changes[0].device, changes[1].device);
    }

    #[test]
    fn should_keep_unqualified_device_distinct_from_named_one() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = multi_device_engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/Outside_Temperature", "7.5");
        engine.ingest("panasonic_heat_pump/main/Outside_Temperature", "8.0");

        assert_eq!(engine.devices().len(), 2);
        let implicit = engine.entity(&DeviceKey::Default, "Outside_Temperature").unwrap();
        let main = engine
            .entity(&DeviceKey::named("main"), "Outside_Temperature")
            .unwrap();
        assert_eq!(implicit.value, Some(ChannelValue::Numeric(7.5)));
        assert_eq!(main.value, Some(ChannelValue::Numeric(8.0)));
    }

    #[test]
    fn should_decode_bitfield_status_flag() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/main/Heatpump_State", "1");

        let entity = engine
            .entity(&DeviceKey::named("main"), "Heatpump_State")
            .unwrap();
        assert_eq!(entity.value.as_ref().unwrap().bit("on"), Some(true));
    }

    #[test]
    fn should_skip_own_command_echo_silently() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);

        engine.ingest("panasonic_heat_pump/commands/SetDHWTemp", "48");

        assert!(engine.registry().is_empty());
        assert!(listener.changes().is_empty());
    }

    #[test]
    fn should_dispatch_command_through_the_sink() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let engine = engine(&listener, &sink);

        engine
            .dispatch(
                &DeviceKey::named("main"),
                "DHW_Target_Temperature",
                &ChannelValue::Numeric(50.0),
            )
            .unwrap();

        assert_eq!(
            sink.messages(),
            vec![OutboundMessage {
                topic: "panasonic_heat_pump/commands/SetDHWTemp".to_string(),
                payload: "50".to_string(),
            }]
        );
    }

    #[test]
    fn should_reconcile_command_confirmation_through_observe_path() {
        let (listener, sink) = (RecordingListener::default(), RecordingSink::default());
        let mut engine = engine(&listener, &sink);
        let main = DeviceKey::named("main");

        engine
            .dispatch(&main, "DHW_Target_Temperature", &ChannelValue::Numeric(50.0))
            .unwrap();
        // No optimistic state: the entity appears only once the bridge
        // confirms by publishing the new value.
        assert!(engine.entity(&main, "DHW_Target_Temperature").is_none());

        engine.ingest("panasonic_heat_pump/main/DHW_Target_Temperature", "50");
        let entity = engine.entity(&main, "DHW_Target_Temperature").unwrap();
        assert_eq!(entity.value, Some(ChannelValue::Numeric(50.0)));
    }
}
