//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `aquahub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use aquahub_adapter_mqtt::MqttConfig;
use aquahub_domain::topic::DEFAULT_PREFIX;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decoding engine settings.
    pub engine: EngineConfig,
    /// Broker connection settings.
    pub mqtt: MqttConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Decoding engine settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Topic prefix the bridge publishes under.
    pub prefix: String,
    /// Accept arbitrary device qualifiers (several heat pumps on one bus).
    pub multi_device: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `aquahub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("aquahub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AQUAHUB_PREFIX") {
            self.engine.prefix = val;
        }
        if let Ok(val) = std::env::var("AQUAHUB_MULTI_DEVICE") {
            self.engine.multi_device = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Ok(val) = std::env::var("AQUAHUB_MQTT_HOST") {
            self.mqtt.host = val;
        }
        if let Ok(val) = std::env::var("AQUAHUB_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.port = port;
            }
        }
        if let Ok(val) = std::env::var("AQUAHUB_MQTT_USERNAME") {
            self.mqtt.username = Some(val);
        }
        if let Ok(val) = std::env::var("AQUAHUB_MQTT_PASSWORD") {
            self.mqtt.password = Some(val);
        }
        if let Ok(val) = std::env::var("AQUAHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.prefix.is_empty() {
            return Err(ConfigError::Validation("prefix must not be empty".to_string()));
        }
        if self.engine.prefix.contains(['/', '#', '+']) {
            return Err(ConfigError::Validation(
                "prefix must be a single topic segment".to_string(),
            ));
        }
        if self.mqtt.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            multi_device: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "aquahubd=info,aquahub=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
