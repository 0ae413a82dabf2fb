//! Hand landmark -> raised-finger mapping
//!
//! Uses the MediaPipe hand topology: 21 landmarks in normalized image
//! coordinates. A finger counts as raised when its tip is above its
//! reference joint; the thumb is compared horizontally instead because
//! the camera view is mirrored.

use crate::channels::ChannelId;
use crate::sensor::Landmark;

/// Number of landmarks in a complete hand set.
pub const LANDMARK_COUNT: usize = 21;

/// (tip, reference joint) landmark index per channel, in wire order.
pub const FINGER_LANDMARKS: [(usize, usize); 5] = [
    (4, 3),   // thumb: tip vs IP joint, horizontal
    (8, 6),   // index: tip vs PIP
    (12, 10), // middle
    (16, 14), // ring
    (20, 18), // pinky
];

/// Raised/lowered per channel, indexed by [`ChannelId::index`].
pub type GestureVector = [bool; 5];

/// Map a frame's landmark set to the five-channel raised vector.
///
/// Returns `None` when no hand is present (absent or incomplete set);
/// the orchestrator's fallback policy applies in that case.
pub fn map(landmarks: Option<&[Landmark]>) -> Option<GestureVector> {
    let landmarks = landmarks?;
    if landmarks.len() < LANDMARK_COUNT {
        return None;
    }

    let mut vector = [false; 5];
    for channel in ChannelId::ALL {
        let (tip, joint) = FINGER_LANDMARKS[channel.index()];
        vector[channel.index()] = match channel {
            // Mirrored view: thumb tip to the left of its joint means raised
            ChannelId::Thumb => landmarks[tip].x < landmarks[joint].x,
            // Image y grows downward: smaller y means higher in frame
            _ => landmarks[tip].y < landmarks[joint].y,
        };
    }
    Some(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::sim::hand_pose;

    #[test]
    fn test_absent_landmarks_map_to_none() {
        assert_eq!(map(None), None);
    }

    #[test]
    fn test_incomplete_set_counts_as_absent() {
        let short = vec![Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT - 1];
        assert_eq!(map(Some(&short)), None);
    }

    #[test]
    fn test_all_lowered() {
        let pose = hand_pose([false; 5]);
        assert_eq!(map(Some(&pose)), Some([false; 5]));
    }

    #[test]
    fn test_index_raised_only() {
        let pose = hand_pose([false, true, false, false, false]);
        assert_eq!(map(Some(&pose)), Some([false, true, false, false, false]));
    }

    #[test]
    fn test_thumb_uses_horizontal_ordering() {
        let mut pose = hand_pose([false; 5]);
        let (tip, joint) = FINGER_LANDMARKS[ChannelId::Thumb.index()];
        // Equal heights, tip left of joint: raised
        pose[tip] = Landmark { x: 0.3, y: 0.5 };
        pose[joint] = Landmark { x: 0.5, y: 0.5 };
        let vector = map(Some(&pose)).unwrap();
        assert!(vector[ChannelId::Thumb.index()]);
    }

    #[test]
    fn test_every_finger_maps_independently() {
        for i in 0..5 {
            let mut raised = [false; 5];
            raised[i] = true;
            let pose = hand_pose(raised);
            assert_eq!(map(Some(&pose)), Some(raised), "finger {i}");
        }
    }
}
