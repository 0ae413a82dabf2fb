//! Channel model for the five servo actuators
//!
//! Each finger maps to one fixed channel. The tracker owns the
//! per-channel raised/sweeping state and performs edge detection.

mod tracker;

pub use tracker::{ChannelTracker, SweepClaim};

use serde::{Deserialize, Serialize};

/// One of the five fixed actuator channels, one per finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelId {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl ChannelId {
    /// All channels in wire order (F1..F5).
    pub const ALL: [ChannelId; 5] = [
        ChannelId::Thumb,
        ChannelId::Index,
        ChannelId::Middle,
        ChannelId::Ring,
        ChannelId::Pinky,
    ];

    /// Token used on the serial protocol line.
    pub fn token(self) -> &'static str {
        match self {
            ChannelId::Thumb => "F1",
            ChannelId::Index => "F2",
            ChannelId::Middle => "F3",
            ChannelId::Ring => "F4",
            ChannelId::Pinky => "F5",
        }
    }

    /// Position in [`ChannelId::ALL`], used to index per-channel arrays.
    pub fn index(self) -> usize {
        match self {
            ChannelId::Thumb => 0,
            ChannelId::Index => 1,
            ChannelId::Middle => 2,
            ChannelId::Ring => 3,
            ChannelId::Pinky => 4,
        }
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Transition of a channel's raised state between consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// No actionable transition.
    None,
    /// Lowered -> raised, and the channel was free to start a sweep.
    Rising,
    /// Raised -> lowered.
    Falling,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match_wire_order() {
        let tokens: Vec<&str> = ChannelId::ALL.iter().map(|c| c.token()).collect();
        assert_eq!(tokens, vec!["F1", "F2", "F3", "F4", "F5"]);
    }

    #[test]
    fn test_index_is_position_in_all() {
        for (i, channel) in ChannelId::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }
}
