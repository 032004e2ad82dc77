//! Error taxonomy shared across the workspace.
//!
//! Two propagation regimes exist:
//!
//! - **Telemetry-side** ([`TopicError`], [`DecodeError`]): the offending
//!   message is dropped and logged, processing continues. These never abort
//!   the engine.
//! - **Command-side** ([`CommandError`]): returned synchronously to the
//!   caller; nothing is published. A command is explicit user intent, so
//!   failures must not be silent.

/// Why an inbound topic could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    /// The topic does not start with the configured prefix.
    #[error("topic is outside the `{prefix}` tree")]
    WrongPrefix {
        /// The configured topic prefix.
        prefix: String,
    },

    /// Wrong number of segments after the prefix.
    #[error("expected `<prefix>[/<device>]/<channel>`, got {segments} segment(s) after the prefix")]
    WrongShape {
        /// How many segments followed the prefix.
        segments: usize,
    },

    /// A device or channel segment was present but empty.
    #[error("empty {0} segment")]
    EmptySegment(&'static str),

    /// A device qualifier was seen while multi-device support is disabled.
    #[error("unexpected device qualifier `{0}` (multi-device support is disabled)")]
    UnknownQualifier(String),

    /// The topic is an outbound command topic, not telemetry.
    ///
    /// Seen when subscribed to the whole prefix tree: our own published
    /// commands echo back through the wildcard subscription.
    #[error("`commands` topic carries no telemetry")]
    CommandTopic,
}

/// Why a telemetry payload could not be decoded into a typed value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The channel id is not present in the catalog.
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),

    /// The payload does not parse, or parses outside the channel's valid
    /// domain. Out-of-domain readings are rejected rather than clamped so
    /// bridge bugs stay visible.
    #[error("payload `{payload}` is not a valid reading for channel `{channel}`")]
    InvalidValue {
        /// The channel that rejected the payload.
        channel: &'static str,
        /// The raw payload as received.
        payload: String,
    },

    /// The payload does not match any declared symbol of an enum channel.
    /// The entity keeps its previous value.
    #[error("payload `{payload}` matches no symbol of channel `{channel}`")]
    UnknownSymbol {
        /// The channel that rejected the payload.
        channel: &'static str,
        /// The raw payload as received.
        payload: String,
    },
}

/// Why a command was refused before anything was published.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// The channel id is not present in the catalog.
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),

    /// The channel carries telemetry only.
    #[error("channel `{0}` does not accept commands")]
    NotWritable(&'static str),

    /// A numeric command value lies outside the channel's accepted range.
    #[error("value {value} is outside {min}..={max} accepted by channel `{channel}`")]
    OutOfRange {
        /// The target channel.
        channel: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower inclusive bound.
        min: f64,
        /// Upper inclusive bound.
        max: f64,
    },

    /// A symbolic command value is not one of the channel's options.
    #[error("`{symbol}` is not an option of channel `{channel}`")]
    InvalidSymbol {
        /// The target channel.
        channel: &'static str,
        /// The rejected symbol.
        symbol: String,
    },

    /// The command value's kind does not match the channel's kind.
    #[error("channel `{channel}` expects a {expected} value")]
    KindMismatch {
        /// The target channel.
        channel: &'static str,
        /// The channel's value kind.
        expected: &'static str,
    },
}
