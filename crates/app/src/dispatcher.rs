//! Command dispatcher — validates, encodes, and hands commands to the
//! outbound transport.

use aquahub_domain::catalog::Catalog;
use aquahub_domain::codec;
use aquahub_domain::device::DeviceKey;
use aquahub_domain::error::CommandError;
use aquahub_domain::topic::TopicScheme;
use aquahub_domain::value::ChannelValue;

use crate::ports::{CommandSink, OutboundMessage};

/// Turns typed commands into bridge messages, refusing anything invalid
/// before a single byte is published.
#[derive(Debug)]
pub struct CommandDispatcher<S> {
    catalog: Catalog,
    scheme: TopicScheme,
    sink: S,
}

impl<S: CommandSink> CommandDispatcher<S> {
    /// Dispatcher over the given catalog, topic scheme, and transport sink.
    pub fn new(catalog: Catalog, scheme: TopicScheme, sink: S) -> Self {
        Self {
            catalog,
            scheme,
            sink,
        }
    }

    /// Validate and publish one command.
    ///
    /// Fire-and-forget: the transport confirms nothing; the new value comes
    /// back later as ordinary telemetry and reconciles through the observe
    /// path.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] — unknown channel, read-only channel, or
    /// a value outside the channel's domain — and publishes nothing.
    pub fn send(
        &self,
        device: &DeviceKey,
        channel_id: &str,
        value: &ChannelValue,
    ) -> Result<(), CommandError> {
        let channel = self
            .catalog
            .lookup(channel_id)
            .map_err(|_| CommandError::UnknownChannel(channel_id.to_owned()))?;
        let command = channel
            .command
            .ok_or(CommandError::NotWritable(channel.id))?;

        let payload = codec::encode(channel, value)?;
        let topic = self.scheme.command_topic(device, command);

        tracing::debug!(%device, channel = channel.id, %topic, %payload, "command dispatched");
        self.sink.send(OutboundMessage { topic, payload });
        Ok(())
    }
}
