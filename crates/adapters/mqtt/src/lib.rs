//! # aquahub-adapter-mqtt
//!
//! MQTT adapter — connects the engine to the messaging bus.
//!
//! ## How it works
//!
//! One rumqttc event loop drives everything: inbound publishes from the
//! bridge's topic tree are handed to [`Engine::ingest`], and encoded
//! commands queued by the engine's [`CommandSink`] are drained from a
//! channel and published. Because a single loop processes messages to
//! completion one at a time, the engine's per-device serialization
//! obligation holds without any locking.
//!
//! Connection errors are logged and retried; they never reach the engine.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `aquahub-app` and `aquahub-domain`.

mod config;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;

use aquahub_app::Engine;
use aquahub_app::ports::{ChangeListener, CommandSink, OutboundMessage};
use aquahub_domain::topic::TopicScheme;

/// Build the outbound command channel.
///
/// The sink end goes into the engine; the receiver end goes into
/// [`MqttBridge::run`], which publishes whatever the engine queues.
#[must_use]
pub fn command_channel(capacity: usize) -> (MqttCommandSink, mpsc::Receiver<OutboundMessage>) {
    let (tx, rx) = mpsc::channel(capacity);
    (MqttCommandSink { tx }, rx)
}

/// [`CommandSink`] backed by a bounded channel into the MQTT event loop.
#[derive(Debug, Clone)]
pub struct MqttCommandSink {
    tx: mpsc::Sender<OutboundMessage>,
}

impl CommandSink for MqttCommandSink {
    /// Queue one outbound message. Fire-and-forget: when the channel is
    /// full or closed the command is dropped with a warning, matching the
    /// transport's no-acknowledgment contract.
    fn send(&self, message: OutboundMessage) {
        if let Err(err) = self.tx.try_send(message) {
            tracing::warn!(error = %err, "outbound command dropped");
        }
    }
}

/// The MQTT side of the system: subscription, event loop, publishing.
pub struct MqttBridge {
    client: AsyncClient,
    event_loop: EventLoop,
    filter: String,
    reconnect_delay: Duration,
}

impl MqttBridge {
    /// Prepare a broker connection for the given topic scheme.
    ///
    /// No IO happens here; the connection is established by the first poll
    /// inside [`run`](Self::run).
    #[must_use]
    pub fn connect(config: &MqttConfig, scheme: &TopicScheme) -> Self {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            options.set_credentials(username, password);
        }
        let (client, event_loop) = AsyncClient::new(options, 64);

        Self {
            client,
            event_loop,
            filter: scheme.subscription_filter(),
            reconnect_delay: Duration::from_secs(config.reconnect_delay_secs),
        }
    }

    /// Drive the bridge until the command channel closes.
    ///
    /// Subscribes to the telemetry tree on every (re)connection, forwards
    /// each publish into the engine, and publishes queued commands.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError`] only when a client request cannot be queued,
    /// which means the event loop itself is gone. Connection errors are
    /// logged and retried.
    pub async fn run<L, S>(
        mut self,
        mut engine: Engine<L, S>,
        mut commands: mpsc::Receiver<OutboundMessage>,
    ) -> Result<(), MqttError>
    where
        L: ChangeListener,
        S: CommandSink,
    {
        loop {
            tokio::select! {
                event = self.event_loop.poll() => match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::info!(filter = %self.filter, "connected, subscribing");
                        self.client.subscribe(&self.filter, QoS::AtLeastOnce).await?;
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        match std::str::from_utf8(&publish.payload) {
                            Ok(payload) => engine.ingest(&publish.topic, payload),
                            Err(_) => {
                                tracing::warn!(topic = %publish.topic, "non-UTF-8 payload dropped");
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "connection error, retrying");
                        tokio::time::sleep(self.reconnect_delay).await;
                    }
                },
                maybe = commands.recv() => match maybe {
                    Some(message) => {
                        if let Err(err) = self
                            .client
                            .publish(&message.topic, QoS::AtMostOnce, false, message.payload)
                            .await
                        {
                            tracing::warn!(topic = %message.topic, error = %err, "publish failed");
                        }
                    }
                    None => {
                        tracing::info!("command channel closed, stopping");
                        return Ok(());
                    }
                },
            }
        }
    }
}
