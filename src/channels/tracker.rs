//! Per-channel state tracking and edge detection
//!
//! The tracker is the only writer of `raised`; a sweep releases its
//! channel through the [`SweepClaim`] guard it received when the edge
//! was granted, so `sweeping` can never stay stuck after a failed or
//! panicked sweep.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{ChannelId, Edge};

#[derive(Debug, Default)]
struct Slot {
    raised: bool,
    sweeping: bool,
}

type SharedSlot = Arc<Mutex<Slot>>;

fn lock(slot: &SharedSlot) -> std::sync::MutexGuard<'_, Slot> {
    // A poisoned slot still holds two valid bools; keep going.
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

/// Tracks raised/sweeping state for all five channels.
///
/// Channels are independent: each has its own lock, and updating one
/// never touches another.
#[derive(Debug, Clone, Default)]
pub struct ChannelTracker {
    slots: [SharedSlot; 5],
}

impl ChannelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new observation for `channel` and detect the edge.
    ///
    /// Returns the detected edge plus, on a rising edge with the channel
    /// free, a claim that must be held for the duration of the sweep.
    /// A rising edge on a channel that is already sweeping is suppressed
    /// and reported as [`Edge::None`]. `raised` is always updated.
    pub fn update(&self, channel: ChannelId, raised: bool) -> (Edge, Option<SweepClaim>) {
        let slot = &self.slots[channel.index()];
        let mut guard = lock(slot);
        let was_raised = guard.raised;
        guard.raised = raised;

        if raised && !was_raised {
            if guard.sweeping {
                debug!(%channel, "rising edge suppressed, sweep in flight");
                return (Edge::None, None);
            }
            guard.sweeping = true;
            drop(guard);
            let claim = SweepClaim {
                slot: Arc::clone(slot),
                channel,
            };
            return (Edge::Rising, Some(claim));
        }

        if !raised && was_raised {
            return (Edge::Falling, None);
        }
        (Edge::None, None)
    }

    pub fn is_raised(&self, channel: ChannelId) -> bool {
        lock(&self.slots[channel.index()]).raised
    }

    pub fn is_sweeping(&self, channel: ChannelId) -> bool {
        lock(&self.slots[channel.index()]).sweeping
    }
}

/// Exclusive permission to run one sweep on one channel.
///
/// Dropping the claim releases the channel; this is the only way
/// `sweeping` goes back to false.
#[derive(Debug)]
pub struct SweepClaim {
    slot: SharedSlot,
    channel: ChannelId,
}

impl SweepClaim {
    pub fn channel(&self) -> ChannelId {
        self.channel
    }
}

impl Drop for SweepClaim {
    fn drop(&mut self) {
        lock(&self.slot).sweeping = false;
        debug!(channel = %self.channel, "sweep claim released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_lowered_and_free() {
        let tracker = ChannelTracker::new();
        for channel in ChannelId::ALL {
            assert!(!tracker.is_raised(channel));
            assert!(!tracker.is_sweeping(channel));
        }
    }

    #[test]
    fn test_rising_edge_grants_exactly_one_claim() {
        let tracker = ChannelTracker::new();

        let (edge, claim) = tracker.update(ChannelId::Index, true);
        assert_eq!(edge, Edge::Rising);
        assert!(claim.is_some());
        assert!(tracker.is_raised(ChannelId::Index));
        assert!(tracker.is_sweeping(ChannelId::Index));

        // Holding steady raised is not another edge
        let (edge, claim) = tracker.update(ChannelId::Index, true);
        assert_eq!(edge, Edge::None);
        assert!(claim.is_none());
    }

    #[test]
    fn test_rising_edge_suppressed_while_sweeping() {
        let tracker = ChannelTracker::new();
        let (_, claim) = tracker.update(ChannelId::Middle, true);
        let claim = claim.unwrap();

        // Lower and re-raise while the sweep is still in flight
        let (edge, _) = tracker.update(ChannelId::Middle, false);
        assert_eq!(edge, Edge::Falling);
        let (edge, new_claim) = tracker.update(ChannelId::Middle, true);
        assert_eq!(edge, Edge::None);
        assert!(new_claim.is_none());
        assert!(tracker.is_sweeping(ChannelId::Middle));

        drop(claim);
        assert!(!tracker.is_sweeping(ChannelId::Middle));
    }

    #[test]
    fn test_no_retrigger_until_lowered_and_reraised() {
        let tracker = ChannelTracker::new();
        let (_, claim) = tracker.update(ChannelId::Ring, true);
        drop(claim);

        // Finger still raised when the sweep ended: no new edge
        let (edge, claim) = tracker.update(ChannelId::Ring, true);
        assert_eq!(edge, Edge::None);
        assert!(claim.is_none());

        // Lower, then raise again: fresh edge
        tracker.update(ChannelId::Ring, false);
        let (edge, claim) = tracker.update(ChannelId::Ring, true);
        assert_eq!(edge, Edge::Rising);
        assert!(claim.is_some());
    }

    #[test]
    fn test_channels_are_independent() {
        let tracker = ChannelTracker::new();
        let (_, claim) = tracker.update(ChannelId::Thumb, true);
        assert!(claim.is_some());

        for channel in [ChannelId::Index, ChannelId::Middle, ChannelId::Ring, ChannelId::Pinky] {
            assert!(!tracker.is_raised(channel));
            assert!(!tracker.is_sweeping(channel));
        }

        let (edge, other) = tracker.update(ChannelId::Pinky, true);
        assert_eq!(edge, Edge::Rising);
        assert!(other.is_some());
    }

    #[test]
    fn test_claim_release_survives_clone_of_tracker() {
        let tracker = ChannelTracker::new();
        let view = tracker.clone();
        let (_, claim) = tracker.update(ChannelId::Index, true);
        assert!(view.is_sweeping(ChannelId::Index));
        drop(claim);
        assert!(!view.is_sweeping(ChannelId::Index));
    }
}
