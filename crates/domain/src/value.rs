//! Typed channel values.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A decoded channel value, typed per the channel's declared kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelValue {
    /// A decimal reading or setpoint.
    Numeric(f64),
    /// One of an enum channel's display symbols.
    Symbol(&'static str),
    /// The named flags of a bitfield channel, in declared order.
    Bits(BitStates),
    /// Free-form text, passed through verbatim.
    Text(String),
}

impl ChannelValue {
    /// The numeric reading, if this is a numeric value.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// The display symbol, if this is an enum value.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// The text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a named flag, if this is a bitfield value.
    #[must_use]
    pub fn bit(&self, name: &str) -> Option<bool> {
        match self {
            Self::Bits(bits) => bits.get(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(v) => v.fmt(f),
            Self::Symbol(s) => f.write_str(s),
            Self::Bits(bits) => bits.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Named boolean flags decoded from a bitfield payload, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStates(Vec<(&'static str, bool)>);

impl BitStates {
    /// Build from `(name, state)` pairs in the channel's declared order.
    #[must_use]
    pub fn new(states: Vec<(&'static str, bool)>) -> Self {
        Self(states)
    }

    /// Look up a flag by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|(bit, _)| *bit == name)
            .map(|(_, state)| *state)
    }

    /// Iterate over `(name, state)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.0.iter().copied()
    }

    /// Number of declared flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flags are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for BitStates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, state) in &self.0 {
            map.serialize_entry(name, state)?;
        }
        map.end()
    }
}

impl std::fmt::Display for BitStates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, state)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={state}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_numeric_reading() {
        let value = ChannelValue::Numeric(45.0);
        assert_eq!(value.as_numeric(), Some(45.0));
        assert_eq!(value.as_symbol(), None);
    }

    #[test]
    fn should_expose_symbol() {
        let value = ChannelValue::Symbol("Heat");
        assert_eq!(value.as_symbol(), Some("Heat"));
        assert_eq!(value.as_numeric(), None);
    }

    #[test]
    fn should_look_up_named_bit() {
        let value = ChannelValue::Bits(BitStates::new(vec![("on", true)]));
        assert_eq!(value.bit("on"), Some(true));
        assert_eq!(value.bit("off"), None);
    }

    #[test]
    fn should_serialize_numeric_as_plain_number() {
        let json = serde_json::to_string(&ChannelValue::Numeric(21.5)).unwrap();
        assert_eq!(json, "21.5");
    }

    #[test]
    fn should_serialize_symbol_as_plain_string() {
        let json = serde_json::to_string(&ChannelValue::Symbol("Heat")).unwrap();
        assert_eq!(json, "\"Heat\"");
    }

    #[test]
    fn should_serialize_bits_as_object() {
        let value = ChannelValue::Bits(BitStates::new(vec![("on", true)]));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "{\"on\":true}");
    }

    #[test]
    fn should_display_bits_as_named_flags() {
        let bits = BitStates::new(vec![("on", true), ("fault", false)]);
        assert_eq!(bits.to_string(), "on=true fault=false");
    }

    #[test]
    fn should_compare_equal_values() {
        assert_eq!(ChannelValue::Symbol("Tank"), ChannelValue::Symbol("Tank"));
        assert_ne!(
            ChannelValue::Text("H76".to_string()),
            ChannelValue::Text("H90".to_string())
        );
    }
}
