//! Channel descriptors — the static shape of everything the bridge publishes.

use serde::Serialize;

/// Grouping of channels by optional hardware feature, used to decide default
/// visibility on the platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Always-present heat pump functionality.
    Core,
    /// Cooling circuit (not installed on heating-only units).
    Cooling,
    /// Buffer tank.
    Buffer,
    /// Solar collector input.
    Solar,
    /// Pool heating circuit.
    Pool,
    /// Installer/service readings.
    Diagnostic,
}

impl Category {
    /// Whether entities of this category are visible by default.
    ///
    /// Applied once, at entity creation; enablement afterwards belongs to
    /// the platform.
    #[must_use]
    pub fn default_enabled(self) -> bool {
        matches!(self, Self::Core)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => f.write_str("core"),
            Self::Cooling => f.write_str("cooling"),
            Self::Buffer => f.write_str("buffer"),
            Self::Solar => f.write_str("solar"),
            Self::Pool => f.write_str("pool"),
            Self::Diagnostic => f.write_str("diagnostic"),
        }
    }
}

/// Inclusive bounds accepted for a numeric channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    /// Lower inclusive bound.
    pub min: f64,
    /// Upper inclusive bound.
    pub max: f64,
}

impl NumericRange {
    /// A range accepting any finite reading (counters, energy totals).
    pub const ANY: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Build an inclusive `min..=max` range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range. `NaN` never does.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One option of an enum channel.
///
/// The bridge publishes a wire token (usually a small integer); the platform
/// sees a stable display symbol. Channels may declare `wire == symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSymbol {
    /// Token as it appears on the wire.
    pub wire: &'static str,
    /// Symbol exposed to the platform.
    pub symbol: &'static str,
}

/// Value kind and valid domain of a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelKind {
    /// Decimal payload constrained to a range.
    Numeric(NumericRange),
    /// Payload must match one wire symbol exactly (case-sensitive).
    Enum(&'static [EnumSymbol]),
    /// Integer payload; bit *i* maps to name *i*. Undeclared bits are
    /// ignored so new hardware flags don't break old decoders.
    Bitfield(&'static [&'static str]),
    /// Verbatim text, no validation.
    Text,
}

impl ChannelKind {
    /// Human-readable kind name, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Enum(_) => "enum",
            Self::Bitfield(_) => "bitfield",
            Self::Text => "text",
        }
    }
}

/// Immutable description of one telemetry/command point exposed by the
/// bridge. The channel id uniquely determines every other field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDescriptor {
    /// Channel id, unique within the catalog (last topic segment).
    pub id: &'static str,
    /// Feature grouping, drives default visibility.
    pub category: Category,
    /// Value kind and valid domain.
    pub kind: ChannelKind,
    /// Unit of measurement, if any.
    pub unit: Option<&'static str>,
    /// Bridge command segment (e.g. `SetDHWTemp`) for writable channels.
    pub command: Option<&'static str>,
}

impl ChannelDescriptor {
    /// Whether entities for this channel start out enabled.
    #[must_use]
    pub fn default_enabled(&self) -> bool {
        self.category.default_enabled()
    }

    /// Whether the channel accepts commands.
    #[must_use]
    pub fn writable(&self) -> bool {
        self.command.is_some()
    }
}
