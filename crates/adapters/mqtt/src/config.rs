//! MQTT broker connection settings.

use serde::Deserialize;

/// Broker connection configuration. Every field has a default so a bare
/// `[mqtt]` section (or none at all) connects to a local broker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker hostname or IP.
    pub host: String,
    /// Broker TCP port.
    pub port: u16,
    /// Client identifier presented to the broker.
    pub client_id: String,
    /// Optional username.
    pub username: Option<String>,
    /// Optional password.
    pub password: Option<String>,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u64,
    /// Delay before retrying after a connection error, in seconds.
    pub reconnect_delay_secs: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "aquahub".to_string(),
            username: None,
            password: None,
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_local_broker() {
        let config = MqttConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1883);
        assert_eq!(config.client_id, "aquahub");
        assert!(config.username.is_none());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let config: MqttConfig = toml::from_str(
            "
            host = 'broker.lan'
            username = 'pump'
            password = 'secret'
            ",
        )
        .unwrap();
        assert_eq!(config.host, "broker.lan");
        assert_eq!(config.port, 1883);
        assert_eq!(config.username.as_deref(), Some("pump"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn should_parse_empty_toml() {
        let config: MqttConfig = toml::from_str("").unwrap();
        assert_eq!(config.keep_alive_secs, 30);
        assert_eq!(config.reconnect_delay_secs, 5);
    }
}
