//! Observability events emitted by the frame loop
//!
//! Broadcast alongside the log stream so an external status consumer
//! (UI overlay, future IPC surface) can follow mode and sweep activity.
//! Not part of the control contract.

use serde::{Deserialize, Serialize};

use crate::channels::ChannelId;
use crate::mode::Mode;

/// Events describing observable state changes of the control loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// The active mapping mode changed.
    ModeChanged { mode: Mode },

    /// A rising edge launched a sweep on this channel.
    SweepStarted { channel: ChannelId },

    /// The hand disappeared from view; channels are being reset.
    HandLost,

    /// A hand is visible again after an absence.
    HandDetected,
}

impl std::fmt::Display for StateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateEvent::ModeChanged { mode } => write!(f, "MODE_CHANGED ({mode})"),
            StateEvent::SweepStarted { channel } => write!(f, "SWEEP_STARTED ({channel})"),
            StateEvent::HandLost => write!(f, "HAND_LOST"),
            StateEvent::HandDetected => write!(f, "HAND_DETECTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = StateEvent::SweepStarted {
            channel: ChannelId::Index,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("sweep_started"));
        assert!(json.contains("index"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"mode_changed","mode":"audio"}"#;
        let event: StateEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            StateEvent::ModeChanged { mode: Mode::Audio }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(StateEvent::HandLost.to_string(), "HAND_LOST");
        assert_eq!(
            StateEvent::SweepStarted {
                channel: ChannelId::Pinky
            }
            .to_string(),
            "SWEEP_STARTED (F5)"
        );
    }
}
