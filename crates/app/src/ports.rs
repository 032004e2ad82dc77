//! Ports — the IO boundaries adapters plug into.
//!
//! Both traits are synchronous: the engine never blocks on IO. Adapters
//! bridge to their own async runtime (e.g. by pushing into a channel).

use aquahub_domain::entity::EntityChange;

/// Receives the append-only entity-change stream on the platform boundary.
///
/// Called on every observation, including value-unchanged ones; a fresh
/// message is itself a liveness signal.
pub trait ChangeListener {
    /// Handle one change notification.
    fn entity_changed(&self, change: EntityChange);
}

impl<T: ChangeListener + ?Sized> ChangeListener for &T {
    fn entity_changed(&self, change: EntityChange) {
        (**self).entity_changed(change);
    }
}

/// An encoded command ready for the outbound transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Fully-built command topic.
    pub topic: String,
    /// Bridge-compatible payload.
    pub payload: String,
}

/// Hands encoded commands to the outbound transport collaborator.
///
/// Fire-and-forget: delivery confirmation arrives later as ordinary
/// telemetry on the same channel and reconciles through the observe path.
pub trait CommandSink {
    /// Accept one outbound message.
    fn send(&self, message: OutboundMessage);
}

impl<T: CommandSink + ?Sized> CommandSink for &T {
    fn send(&self, message: OutboundMessage) {
        (**self).send(message);
    }
}
