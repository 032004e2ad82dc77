//! # aquahubd — aquahub daemon
//!
//! Composition root that wires the catalog, engine, and MQTT adapter
//! together and runs until interrupted.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct the channel catalog and the decoding engine
//! - Connect the MQTT adapter and drive it
//! - Handle graceful shutdown (ctrl-c)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod notify;

use aquahub_adapter_mqtt::{MqttBridge, command_channel};
use aquahub_app::Engine;
use aquahub_domain::catalog::Catalog;
use aquahub_domain::topic::TopicScheme;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::notify::StdoutNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let scheme = TopicScheme::new(&config.engine.prefix, config.engine.multi_device);
    let catalog = Catalog::builtin();
    tracing::info!(
        prefix = scheme.prefix(),
        multi_device = config.engine.multi_device,
        channels = catalog.len(),
        "engine ready"
    );

    let (sink, commands) = command_channel(64);
    let engine = Engine::new(scheme.clone(), catalog, StdoutNotifier, sink);
    let bridge = MqttBridge::connect(&config.mqtt, &scheme);
    tracing::info!(
        host = %config.mqtt.host,
        port = config.mqtt.port,
        "connecting to broker"
    );

    tokio::select! {
        result = bridge.run(engine, commands) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    Ok(())
}
