//! Trigger events fed to the routine evaluator.
//!
//! An external event source (clock, location provider) produces these; the
//! core places no constraint on sampling frequency but assumes events arrive
//! in non-decreasing time order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A clock tick or a position sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TriggerEvent {
    /// Minute-boundary clock tick, `hhmm` in "HH:MM".
    #[serde(rename = "Tick")]
    Tick {
        hhmm: String,
        #[serde(default = "now")]
        at: DateTime<Utc>,
    },

    /// A position sample from the location provider.
    #[serde(rename = "Position")]
    Position {
        latitude: f64,
        longitude: f64,
        #[serde(default = "now")]
        at: DateTime<Utc>,
    },
}

impl TriggerEvent {
    pub fn tick(hhmm: &str) -> Self {
        Self::Tick {
            hhmm: hhmm.to_string(),
            at: Utc::now(),
        }
    }

    pub fn position(latitude: f64, longitude: f64) -> Self {
        Self::Position {
            latitude,
            longitude,
            at: Utc::now(),
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Tick { at, .. } | Self::Position { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_deserializes_without_timestamp() {
        let toml = r#"
            type = "Tick"
            hhmm = "08:00"
        "#;
        let event: TriggerEvent = toml::from_str(toml).unwrap();
        assert!(matches!(event, TriggerEvent::Tick { ref hhmm, .. } if hhmm == "08:00"));
    }

    #[test]
    fn position_roundtrips_through_json() {
        let event = TriggerEvent::position(34.0522, -118.2437);
        let json = serde_json::to_string(&event).unwrap();
        let decoded: TriggerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }
}
