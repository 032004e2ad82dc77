//! Platform boundary — the entity-change stream leaves the process here.

use aquahub_app::ports::ChangeListener;
use aquahub_domain::entity::EntityChange;

/// Writes each change as one JSON line on stdout, the append-only
/// notification stream a host platform consumes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl ChangeListener for StdoutNotifier {
    fn entity_changed(&self, change: EntityChange) {
        match serde_json::to_string(&change) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::error!(error = %err, "change serialization failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquahub_domain::time::now;
    use aquahub_domain::value::ChannelValue;

    #[test]
    fn should_serialize_change_to_one_json_line() {
        let change = EntityChange {
            device: "panasonic_heat_pump_main".to_string(),
            channel: "Outside_Temperature",
            value: ChannelValue::Numeric(7.5),
            enabled: true,
            created: false,
            at: now(),
        };
        let line = serde_json::to_string(&change).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"Outside_Temperature\""));
    }
}
