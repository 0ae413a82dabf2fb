//! Open-loop sweep animation
//!
//! A sweep plays the full 0..=180 ramp in 10 degree steps, one command
//! per step, then forces a final 180 so the channel ends at the top of
//! the ramp no matter what. It runs as its own task and never blocks
//! the frame loop or other channels.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::channels::SweepClaim;
use crate::serial::{Command, CommandSender};

/// Ramp step size in degrees.
pub const STEP_DEG: u8 = 10;

/// End-of-sweep position, re-sent unconditionally as the last command.
pub const FINAL_ANGLE: u8 = 180;

/// Play one sweep on the claimed channel.
///
/// Transmission failures are handled inside the sender (logged, not
/// returned), so the ramp always runs to completion, and the claim is
/// released by drop on every exit path.
pub async fn run(claim: SweepClaim, commands: CommandSender, step_delay: Duration) {
    let channel = claim.channel();
    debug!(%channel, "sweep started");

    for angle in (0..=FINAL_ANGLE).step_by(STEP_DEG as usize) {
        commands.send(Command::new(channel, angle)).await;
        sleep(step_delay).await;
    }
    // Hold the end position regardless of how the ramp rounded
    commands.send(Command::new(channel, FINAL_ANGLE)).await;

    debug!(%channel, "sweep finished");
    // claim drops here, releasing the channel for the next edge
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{ChannelId, ChannelTracker};

    const STEP_DELAY: Duration = Duration::from_millis(20);

    #[tokio::test(start_paused = true)]
    async fn test_sweep_emits_full_ramp_plus_forced_final() {
        let tracker = ChannelTracker::new();
        let (_, claim) = tracker.update(ChannelId::Index, true);
        let (sender, mut rx) = CommandSender::channel(64);

        let task = tokio::spawn(run(claim.unwrap(), sender, STEP_DELAY));

        let mut angles = Vec::new();
        while let Some(command) = rx.recv().await {
            assert_eq!(command.channel(), ChannelId::Index);
            angles.push(command.angle());
        }
        task.await.unwrap();

        let mut expected: Vec<u8> = (0..=180).step_by(10).collect();
        expected.push(180);
        assert_eq!(angles, expected);
        assert_eq!(angles.len(), 20);
        assert!(!tracker.is_sweeping(ChannelId::Index));
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_released_even_when_transmission_fails() {
        let tracker = ChannelTracker::new();
        let (_, claim) = tracker.update(ChannelId::Ring, true);
        let (sender, rx) = CommandSender::channel(64);

        // Writer disappears before the sweep starts: every send fails
        drop(rx);
        run(claim.unwrap(), sender, STEP_DELAY).await;

        assert!(!tracker.is_sweeping(ChannelId::Ring));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_on_different_channels_run_concurrently() {
        let tracker = ChannelTracker::new();
        let (sender, mut rx) = CommandSender::channel(64);

        let (_, index_claim) = tracker.update(ChannelId::Index, true);
        let (_, pinky_claim) = tracker.update(ChannelId::Pinky, true);

        let a = tokio::spawn(run(index_claim.unwrap(), sender.clone(), STEP_DELAY));
        let b = tokio::spawn(run(pinky_claim.unwrap(), sender, STEP_DELAY));

        let mut per_channel = [0usize; 5];
        while let Some(command) = rx.recv().await {
            per_channel[command.channel().index()] += 1;
        }
        a.await.unwrap();
        b.await.unwrap();

        assert_eq!(per_channel[ChannelId::Index.index()], 20);
        assert_eq!(per_channel[ChannelId::Pinky.index()], 20);
    }
}
