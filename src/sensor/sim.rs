//! Simulated sensor sources
//!
//! Default inputs for running the daemon without capture hardware: a
//! scripted hand that raises one finger at a time (with a hand-away
//! phase to exercise the reset fallback) and a slowly pulsing audio
//! level.

use crate::mapper::gesture::{FINGER_LANDMARKS, GestureVector, LANDMARK_COUNT};

use super::{FrameSource, Landmark, LandmarkSet};

/// Build a complete landmark set encoding the given raised vector.
///
/// Also used by tests as a convenient pose constructor.
pub fn hand_pose(raised: GestureVector) -> LandmarkSet {
    let mut points = vec![Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT];
    for (i, &(tip, joint)) in FINGER_LANDMARKS.iter().enumerate() {
        if i == 0 {
            // Thumb is judged horizontally (mirrored view)
            points[joint] = Landmark { x: 0.5, y: 0.5 };
            points[tip] = Landmark {
                x: if raised[i] { 0.4 } else { 0.6 },
                y: 0.5,
            };
        } else {
            points[joint] = Landmark { x: 0.5, y: 0.5 };
            points[tip] = Landmark {
                x: 0.5,
                y: if raised[i] { 0.3 } else { 0.7 },
            };
        }
    }
    points
}

const FRAMES_PER_PHASE: u64 = 45;

/// Scripted frame source: cycles through the five fingers, raising each
/// mid-phase so every finger produces a clean rising edge, then hides
/// the hand for one phase.
#[derive(Debug, Default)]
pub struct ScriptedFrames {
    tick: u64,
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Option<LandmarkSet> {
        let t = self.tick;
        self.tick += 1;

        let phase = (t / FRAMES_PER_PHASE) % 6;
        if phase == 5 {
            return None;
        }

        let mut raised = [false; 5];
        if t % FRAMES_PER_PHASE >= FRAMES_PER_PHASE / 3 {
            raised[phase as usize] = true;
        }
        Some(hand_pose(raised))
    }
}

/// Slow sine pulse in [0,1], standing in for microphone loudness.
#[derive(Debug, Default)]
pub struct PulseEnergy {
    tick: u64,
}

impl super::EnergySource for PulseEnergy {
    fn current_energy(&mut self) -> f32 {
        let t = self.tick as f32;
        self.tick += 1;
        0.5 + 0.5 * (t * 0.05).sin()
    }
}
