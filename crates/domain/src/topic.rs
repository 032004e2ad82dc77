//! Topic grammar — `<prefix>[/<device>]/<channel>` inbound,
//! `<prefix>[/<device>]/commands/<Set…>` outbound.

use crate::device::DeviceKey;
use crate::error::TopicError;

/// Topic prefix the bridge firmware ships with.
pub const DEFAULT_PREFIX: &str = "panasonic_heat_pump";

/// The conventional qualifier the bridge publishes its own telemetry under.
pub const PRIMARY_QUALIFIER: &str = "main";

/// Reserved segment for the outbound command tree.
const COMMANDS_SEGMENT: &str = "commands";

/// A successfully split inbound topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic<'a> {
    /// Which device the message belongs to.
    pub device: DeviceKey,
    /// The channel id segment.
    pub channel: &'a str,
}

/// The configured topic layout: prefix plus multi-device policy.
///
/// With multi-device disabled (the default) only the conventional
/// [`PRIMARY_QUALIFIER`] and unqualified topics are accepted, so a second
/// bridge on the same bus cannot silently corrupt the first one's entities.
#[derive(Debug, Clone)]
pub struct TopicScheme {
    prefix: String,
    multi_device: bool,
}

impl TopicScheme {
    /// Build a scheme from the configured prefix and multi-device flag.
    pub fn new(prefix: impl Into<String>, multi_device: bool) -> Self {
        Self {
            prefix: prefix.into(),
            multi_device,
        }
    }

    /// The scheme with the firmware's stock prefix, single device.
    #[must_use]
    pub fn stock() -> Self {
        Self::new(DEFAULT_PREFIX, false)
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Subscription filter covering the whole telemetry tree.
    #[must_use]
    pub fn subscription_filter(&self) -> String {
        format!("{}/#", self.prefix)
    }

    /// Split an inbound topic into device and channel segments.
    ///
    /// # Errors
    ///
    /// Returns a [`TopicError`] when the topic lies outside the prefix tree,
    /// has the wrong number of segments, carries empty segments, uses an
    /// unexpected qualifier while multi-device is disabled, or is an echo of
    /// the outbound command tree.
    pub fn parse<'a>(&self, topic: &'a str) -> Result<ParsedTopic<'a>, TopicError> {
        let rest = topic
            .strip_prefix(&self.prefix)
            .ok_or_else(|| self.wrong_prefix())?;
        let rest = match rest.strip_prefix('/') {
            Some(rest) => rest,
            None if rest.is_empty() => return Err(TopicError::WrongShape { segments: 0 }),
            // Prefix matched only a leading substring (`<prefix>_extra/…`).
            None => return Err(self.wrong_prefix()),
        };

        let segments: Vec<&'a str> = rest.split('/').collect();
        match segments.as_slice() {
            [channel] if *channel == COMMANDS_SEGMENT => Err(TopicError::CommandTopic),
            [channel] => Ok(ParsedTopic {
                device: DeviceKey::Default,
                channel: Self::channel_segment(channel)?,
            }),
            [qualifier, _] if *qualifier == COMMANDS_SEGMENT => Err(TopicError::CommandTopic),
            [qualifier, channel] => Ok(ParsedTopic {
                device: self.qualifier_segment(qualifier)?,
                channel: Self::channel_segment(channel)?,
            }),
            [_, middle, _] if *middle == COMMANDS_SEGMENT => Err(TopicError::CommandTopic),
            other => Err(TopicError::WrongShape {
                segments: other.len(),
            }),
        }
    }

    /// Build the outbound topic for a device's command segment.
    ///
    /// The default device and the bridge's own [`PRIMARY_QUALIFIER`] publish
    /// commands on the unqualified tree, which is what the firmware listens
    /// on; every other device gets its qualifier inserted.
    #[must_use]
    pub fn command_topic(&self, device: &DeviceKey, command: &str) -> String {
        match device {
            DeviceKey::Default => format!("{}/{COMMANDS_SEGMENT}/{command}", self.prefix),
            DeviceKey::Named(name) if name.as_str() == PRIMARY_QUALIFIER => {
                format!("{}/{COMMANDS_SEGMENT}/{command}", self.prefix)
            }
            DeviceKey::Named(name) => {
                format!("{}/{name}/{COMMANDS_SEGMENT}/{command}", self.prefix)
            }
        }
    }

    fn qualifier_segment(&self, qualifier: &str) -> Result<DeviceKey, TopicError> {
        if qualifier.is_empty() {
            return Err(TopicError::EmptySegment("device"));
        }
        if !self.multi_device && qualifier != PRIMARY_QUALIFIER {
            return Err(TopicError::UnknownQualifier(qualifier.to_owned()));
        }
        Ok(DeviceKey::named(qualifier))
    }

    fn channel_segment(channel: &str) -> Result<&str, TopicError> {
        if channel.is_empty() {
            return Err(TopicError::EmptySegment("channel"));
        }
        Ok(channel)
    }

    fn wrong_prefix(&self) -> TopicError {
        TopicError::WrongPrefix {
            prefix: self.prefix.clone(),
        }
    }
}
