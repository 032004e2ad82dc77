//! # aquahub-domain
//!
//! Pure domain model for the aquahub heat-pump bridge translator.
//!
//! ## Responsibilities
//! - Foundational types: timestamps, error conventions
//! - Define the **Channel Catalog** (the closed table of everything the
//!   bridge can publish, with types, units, and policy)
//! - Define **typed channel values** and the **payload codec** that converts
//!   between bridge payloads and typed values
//! - Define the **topic grammar** (`<prefix>[/<device>]/<channel>`)
//! - Define **Devices** (one physical heat pump per topic qualifier) and
//!   **Entities** (one channel's live state for one device)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod catalog;
pub mod channel;
pub mod codec;
pub mod device;
pub mod entity;
pub mod topic;
pub mod value;
