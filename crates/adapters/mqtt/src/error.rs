//! MQTT adapter error types.

/// Errors specific to the MQTT adapter.
///
/// Connection-level failures are not represented here: the event loop logs
/// them and retries, so they never escape [`run`](crate::MqttBridge::run).
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// A client request (subscribe, publish) could not be queued.
    #[error("MQTT client request failed")]
    Client(#[from] rumqttc::ClientError),
}
