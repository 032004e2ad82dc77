//! The channel catalog — the closed table of everything the bridge
//! publishes, loaded once at startup and never mutated.
//!
//! Every channel's type, unit, valid domain, command segment, and default
//! visibility is declared here, so the full entity surface is statically
//! knowable. Channels absent from this table are dropped at decode time
//! rather than turned into untyped entities.

use std::collections::HashMap;

use crate::channel::{Category, ChannelDescriptor, ChannelKind, EnumSymbol, NumericRange};
use crate::error::DecodeError;

const fn sym(wire: &'static str, symbol: &'static str) -> EnumSymbol {
    EnumSymbol { wire, symbol }
}

const fn reading(
    id: &'static str,
    category: Category,
    range: NumericRange,
    unit: Option<&'static str>,
) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Numeric(range),
        unit,
        command: None,
    }
}

const fn setpoint(
    id: &'static str,
    category: Category,
    range: NumericRange,
    unit: Option<&'static str>,
    command: &'static str,
) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Numeric(range),
        unit,
        command: Some(command),
    }
}

const fn options(
    id: &'static str,
    category: Category,
    symbols: &'static [EnumSymbol],
) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Enum(symbols),
        unit: None,
        command: None,
    }
}

const fn select(
    id: &'static str,
    category: Category,
    symbols: &'static [EnumSymbol],
    command: &'static str,
) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Enum(symbols),
        unit: None,
        command: Some(command),
    }
}

const fn flag(id: &'static str, category: Category) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Bitfield(ON_BIT),
        unit: None,
        command: None,
    }
}

const fn switch(id: &'static str, category: Category, command: &'static str) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Bitfield(ON_BIT),
        unit: None,
        command: Some(command),
    }
}

const fn text(id: &'static str, category: Category) -> ChannelDescriptor {
    ChannelDescriptor {
        id,
        category,
        kind: ChannelKind::Text,
        unit: None,
        command: None,
    }
}

/// Single-bit table shared by the bridge's `0`/`1` status channels.
const ON_BIT: &[&str] = &["on"];

/// Counters and energy totals: any non-negative reading is plausible.
const NON_NEGATIVE: NumericRange = NumericRange::new(0.0, f64::INFINITY);

const CELSIUS: Option<&str> = Some("°C");
const WATT: Option<&str> = Some("W");

const OPERATING_MODES: &[EnumSymbol] = &[
    sym("0", "Heat"),
    sym("1", "Cool"),
    sym("2", "Auto"),
    sym("3", "DHW"),
    sym("4", "Heat+DHW"),
    sym("5", "Cool+DHW"),
    sym("6", "Auto+DHW"),
];

const ZONE_STATES: &[EnumSymbol] = &[
    sym("0", "Zone 1"),
    sym("1", "Zone 2"),
    sym("2", "Zones 1 + 2"),
];

const QUIET_MODES: &[EnumSymbol] = &[
    sym("0", "Off"),
    sym("1", "1"),
    sym("2", "2"),
    sym("3", "3"),
    sym("4", "Scheduled"),
];

const POWERFUL_MODE_TIMES: &[EnumSymbol] = &[
    sym("0", "Off"),
    sym("1", "30 min"),
    sym("2", "60 min"),
    sym("3", "90 min"),
];

const THREEWAY_VALVE_STATES: &[EnumSymbol] = &[sym("0", "Room"), sym("1", "Tank")];

const SOLAR_MODES: &[EnumSymbol] = &[sym("0", "Disabled"), sym("1", "Buffer"), sym("2", "DHW")];

/// Every channel the bridge publishes, grouped the way the heat pump's
/// feature set is grouped.
static CHANNELS: &[ChannelDescriptor] = &[
    // Power, mode, and schedules
    switch("Heatpump_State", Category::Core, "SetHeatpump"),
    select(
        "Operating_Mode_State",
        Category::Core,
        OPERATING_MODES,
        "SetOperationMode",
    ),
    select("Zones_State", Category::Core, ZONE_STATES, "SetZones"),
    select("Quiet_Mode_Level", Category::Core, QUIET_MODES, "SetQuietMode"),
    flag("Quiet_Mode_Schedule", Category::Core),
    select(
        "Powerful_Mode_Time",
        Category::Core,
        POWERFUL_MODE_TIMES,
        "SetPowerfulMode",
    ),
    switch("Holiday_Mode_State", Category::Core, "SetHolidayMode"),
    switch("Force_DHW_State", Category::Core, "SetForceDHW"),
    switch("Defrosting_State", Category::Core, "SetForceDefrost"),
    switch("Sterilization_State", Category::Core, "SetForceSterilization"),
    switch("Main_Schedule_State", Category::Core, "SetMainSchedule"),
    // Hydronics
    reading("Pump_Flow", Category::Core, NumericRange::new(0.0, 100.0), Some("L/min")),
    flag("Pump_Duty", Category::Core),
    reading(
        "Main_Inlet_Temperature",
        Category::Core,
        NumericRange::new(-30.0, 100.0),
        CELSIUS,
    ),
    reading(
        "Main_Outlet_Temperature",
        Category::Core,
        NumericRange::new(-30.0, 100.0),
        CELSIUS,
    ),
    reading(
        "Main_Target_Temperature",
        Category::Core,
        NumericRange::new(-30.0, 100.0),
        CELSIUS,
    ),
    reading(
        "Outside_Temperature",
        Category::Core,
        NumericRange::new(-40.0, 50.0),
        CELSIUS,
    ),
    reading(
        "Room_Thermostat_Temperature",
        Category::Core,
        NumericRange::new(-10.0, 50.0),
        CELSIUS,
    ),
    options("ThreeWay_Valve_State", Category::Core, THREEWAY_VALVE_STATES),
    // Setpoints (zone shifts are relative, hence the negative bounds)
    setpoint(
        "Z1_Heat_Request_Temperature",
        Category::Core,
        NumericRange::new(-5.0, 20.0),
        CELSIUS,
        "SetZ1HeatRequestTemperature",
    ),
    setpoint(
        "Z1_Cool_Request_Temperature",
        Category::Cooling,
        NumericRange::new(-5.0, 20.0),
        CELSIUS,
        "SetZ1CoolRequestTemperature",
    ),
    setpoint(
        "Z2_Heat_Request_Temperature",
        Category::Core,
        NumericRange::new(-5.0, 20.0),
        CELSIUS,
        "SetZ2HeatRequestTemperature",
    ),
    setpoint(
        "Z2_Cool_Request_Temperature",
        Category::Cooling,
        NumericRange::new(-5.0, 20.0),
        CELSIUS,
        "SetZ2CoolRequestTemperature",
    ),
    setpoint(
        "Heat_Delta",
        Category::Core,
        NumericRange::new(1.0, 15.0),
        CELSIUS,
        "SetFloorHeatDelta",
    ),
    setpoint(
        "Cool_Delta",
        Category::Cooling,
        NumericRange::new(1.0, 15.0),
        CELSIUS,
        "SetFloorCoolDelta",
    ),
    setpoint(
        "DHW_Heat_Delta",
        Category::Core,
        NumericRange::new(-12.0, -2.0),
        CELSIUS,
        "SetDHWHeatDelta",
    ),
    // Domestic hot water
    reading(
        "DHW_Temperature",
        Category::Core,
        NumericRange::new(-10.0, 100.0),
        CELSIUS,
    ),
    setpoint(
        "DHW_Target_Temperature",
        Category::Core,
        NumericRange::new(40.0, 65.0),
        CELSIUS,
        "SetDHWTemp",
    ),
    flag("DHW_Heater_State", Category::Core),
    flag("DHW_Installed", Category::Core),
    // Backup heaters
    flag("Room_Heater_State", Category::Core),
    flag("Internal_Heater_State", Category::Core),
    flag("External_Heater_State", Category::Core),
    flag("Force_Heater_State", Category::Core),
    // Optional hardware
    reading(
        "Buffer_Temperature",
        Category::Buffer,
        NumericRange::new(-30.0, 100.0),
        CELSIUS,
    ),
    flag("Buffer_Installed", Category::Buffer),
    reading(
        "Solar_Temperature",
        Category::Solar,
        NumericRange::new(-30.0, 150.0),
        CELSIUS,
    ),
    options("Solar_Mode", Category::Solar, SOLAR_MODES),
    reading(
        "Pool_Temperature",
        Category::Pool,
        NumericRange::new(0.0, 60.0),
        CELSIUS,
    ),
    // Energy accounting
    reading("Heat_Energy_Production", Category::Core, NON_NEGATIVE, WATT),
    reading("Heat_Energy_Consumption", Category::Core, NON_NEGATIVE, WATT),
    reading("Cool_Energy_Production", Category::Cooling, NON_NEGATIVE, WATT),
    reading("Cool_Energy_Consumption", Category::Cooling, NON_NEGATIVE, WATT),
    reading("DHW_Energy_Production", Category::Core, NON_NEGATIVE, WATT),
    reading("DHW_Energy_Consumption", Category::Core, NON_NEGATIVE, WATT),
    // Diagnostics
    reading(
        "Compressor_Frequency",
        Category::Diagnostic,
        NumericRange::new(0.0, 255.0),
        Some("Hz"),
    ),
    reading("Operations_Hours", Category::Diagnostic, NON_NEGATIVE, Some("h")),
    reading("Operations_Counter", Category::Diagnostic, NON_NEGATIVE, None),
    text("Error", Category::Diagnostic),
    text("Heat_Pump_Model", Category::Diagnostic),
];

/// Read-only channel lookup, built once at process start.
#[derive(Debug, Clone)]
pub struct Catalog {
    index: HashMap<&'static str, &'static ChannelDescriptor>,
}

impl Catalog {
    /// Build a catalog from a static channel table.
    ///
    /// # Panics
    ///
    /// Panics if two channels share an id; the table is a compile-time
    /// constant, so a duplicate is a programming error.
    #[must_use]
    pub fn new(channels: &'static [ChannelDescriptor]) -> Self {
        let mut index = HashMap::with_capacity(channels.len());
        for channel in channels {
            let previous = index.insert(channel.id, channel);
            assert!(previous.is_none(), "duplicate channel id `{}`", channel.id);
        }
        Self { index }
    }

    /// The full bridge channel table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(CHANNELS)
    }

    /// Look up a channel by id.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownChannel`] for ids not in the catalog,
    /// so callers drop the message instead of creating an untyped entity.
    pub fn lookup(&self, id: &str) -> Result<&'static ChannelDescriptor, DecodeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| DecodeError::UnknownChannel(id.to_owned()))
    }

    /// Iterate over every declared channel.
    pub fn iter(&self) -> impl Iterator<Item = &'static ChannelDescriptor> + '_ {
        self.index.values().copied()
    }

    /// Number of declared channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
