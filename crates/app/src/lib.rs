//! # aquahub-app
//!
//! The entity-synchronization engine: inbound messages in, typed entity
//! state and change notifications out; typed commands in, bridge payloads
//! out.
//!
//! ## Responsibilities
//! - Own the live **Entity Registry** (per-device, per-channel state)
//! - Coordinate **Devices** across one shared bus
//! - Run the inbound pipeline: parse → resolve → decode → observe → notify
//! - Validate and encode outbound **commands**
//! - Define the IO **ports** (change listener, command sink) that adapters
//!   implement
//!
//! ## Concurrency model
//! Entry points are synchronous, pure transformations plus a bounded
//! registry mutation. Each message is processed to completion before the
//! next; hosts with a concurrent transport must serialize calls per device.
//! A single transport event loop (the MQTT adapter's) satisfies that
//! obligation trivially.
//!
//! ## Dependency rule
//! Depends only on `aquahub-domain`. No transport, no persistence, no IO.

pub mod coordinator;
pub mod dispatcher;
pub mod engine;
pub mod ports;
pub mod registry;

pub use engine::{Engine, IngestError};
