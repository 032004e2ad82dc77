//! Payload codec — converts between raw bridge payloads and typed values.
//!
//! Pure functions operating on `&str` payloads; the channel descriptor
//! supplies the kind and valid domain. Decoding rejects anything outside the
//! declared domain, it never clamps. Encoding is the inverse and refuses to
//! produce a payload the bridge would not accept.

use crate::channel::{ChannelDescriptor, ChannelKind, EnumSymbol, NumericRange};
use crate::error::{CommandError, DecodeError};
use crate::value::{BitStates, ChannelValue};

/// Decode a raw payload into a typed value for `channel`.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidValue`] for unparseable or out-of-domain
/// numeric/bitfield payloads, and [`DecodeError::UnknownSymbol`] for enum
/// payloads matching no declared wire symbol.
pub fn decode(channel: &ChannelDescriptor, payload: &str) -> Result<ChannelValue, DecodeError> {
    match channel.kind {
        ChannelKind::Numeric(range) => decode_numeric(channel.id, range, payload),
        ChannelKind::Enum(symbols) => decode_enum(channel.id, symbols, payload),
        ChannelKind::Bitfield(bits) => decode_bitfield(channel.id, bits, payload),
        ChannelKind::Text => Ok(ChannelValue::Text(payload.to_owned())),
    }
}

/// Encode a typed command value into the raw payload for `channel`.
///
/// # Errors
///
/// Returns [`CommandError::OutOfRange`] for numeric values outside the
/// channel's domain, [`CommandError::InvalidSymbol`] for symbols or bit
/// names the channel does not declare, and [`CommandError::KindMismatch`]
/// when the value's kind does not match the channel's.
pub fn encode(channel: &ChannelDescriptor, value: &ChannelValue) -> Result<String, CommandError> {
    match (channel.kind, value) {
        (ChannelKind::Numeric(range), ChannelValue::Numeric(v)) => {
            if range.contains(*v) {
                Ok(format_numeric(*v))
            } else {
                Err(CommandError::OutOfRange {
                    channel: channel.id,
                    value: *v,
                    min: range.min,
                    max: range.max,
                })
            }
        }
        (ChannelKind::Enum(symbols), ChannelValue::Symbol(symbol)) => symbols
            .iter()
            .find(|option| option.symbol == *symbol)
            .map(|option| option.wire.to_owned())
            .ok_or_else(|| CommandError::InvalidSymbol {
                channel: channel.id,
                symbol: (*symbol).to_owned(),
            }),
        (ChannelKind::Bitfield(bits), ChannelValue::Bits(states)) => {
            encode_bitfield(channel.id, bits, states)
        }
        (ChannelKind::Text, ChannelValue::Text(text)) => Ok(text.clone()),
        (kind, _) => Err(CommandError::KindMismatch {
            channel: channel.id,
            expected: kind.name(),
        }),
    }
}

fn decode_numeric(
    id: &'static str,
    range: NumericRange,
    payload: &str,
) -> Result<ChannelValue, DecodeError> {
    let invalid = || DecodeError::InvalidValue {
        channel: id,
        payload: payload.to_owned(),
    };
    let value: f64 = payload.trim().parse().map_err(|_| invalid())?;
    if range.contains(value) {
        Ok(ChannelValue::Numeric(value))
    } else {
        Err(invalid())
    }
}

fn decode_enum(
    id: &'static str,
    symbols: &'static [EnumSymbol],
    payload: &str,
) -> Result<ChannelValue, DecodeError> {
    symbols
        .iter()
        .find(|option| option.wire == payload)
        .map(|option| ChannelValue::Symbol(option.symbol))
        .ok_or_else(|| DecodeError::UnknownSymbol {
            channel: id,
            payload: payload.to_owned(),
        })
}

fn decode_bitfield(
    id: &'static str,
    bits: &'static [&'static str],
    payload: &str,
) -> Result<ChannelValue, DecodeError> {
    let raw: u64 = payload
        .trim()
        .parse()
        .map_err(|_| DecodeError::InvalidValue {
            channel: id,
            payload: payload.to_owned(),
        })?;
    let states = bits
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, (raw >> i) & 1 == 1))
        .collect();
    Ok(ChannelValue::Bits(BitStates::new(states)))
}

fn encode_bitfield(
    id: &'static str,
    bits: &'static [&'static str],
    states: &BitStates,
) -> Result<String, CommandError> {
    let mut raw: u64 = 0;
    for (name, state) in states.iter() {
        let position =
            bits.iter()
                .position(|bit| *bit == name)
                .ok_or_else(|| CommandError::InvalidSymbol {
                    channel: id,
                    symbol: name.to_owned(),
                })?;
        if state {
            raw |= 1 << position;
        }
    }
    Ok(raw.to_string())
}

/// Integral readings encode without a decimal point, matching what the
/// bridge publishes and accepts.
fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
