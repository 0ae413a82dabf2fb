//! Wire protocol: one ASCII line per actuation
//!
//! `"<channel-token>:<angle>\n"`, angle an integer in [0,180].
//! Fire-and-forget; no acknowledgement, no batching.

use crate::channels::ChannelId;

/// Maximum commanded angle in degrees.
pub const MAX_ANGLE: u8 = 180;

/// An immutable position command: constructed, transmitted, discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    channel: ChannelId,
    angle: u8,
}

impl Command {
    /// Build a command, clamping the angle into [0,180].
    ///
    /// An out-of-range angle here is a caller bug (mappers clamp their
    /// own output), hence the debug assertion.
    pub fn new(channel: ChannelId, angle: u8) -> Self {
        debug_assert!(angle <= MAX_ANGLE, "angle {angle} out of range");
        Self {
            channel,
            angle: angle.min(MAX_ANGLE),
        }
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Encode as the protocol line, including the trailing newline.
    pub fn encode(&self) -> String {
        format!("{}:{}\n", self.channel.token(), self.angle)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.channel.token(), self.angle)
    }
}
