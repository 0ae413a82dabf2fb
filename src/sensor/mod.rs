//! Sensor boundary
//!
//! Capture devices are external collaborators. The core only sees two
//! narrow interfaces: a per-frame landmark source and a continuously
//! updated audio energy estimate. The binary ships simulated sources so
//! the daemon runs end to end without camera or microphone hardware;
//! real capture plugs in behind the same traits.

pub mod sampler;
pub mod sim;

pub use sampler::AudioSampler;

/// One hand landmark in normalized image coordinates (0..1, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// A frame's worth of hand landmarks.
pub type LandmarkSet = Vec<Landmark>;

/// Per-frame hand pose input.
pub trait FrameSource {
    /// The landmark set for the next frame, or `None` when no hand is
    /// visible.
    fn next_frame(&mut self) -> Option<LandmarkSet>;
}

/// Rolling audio loudness input, polled by the background sampler.
pub trait EnergySource {
    /// Current energy estimate; the sampler clamps it into [0,1].
    fn current_energy(&mut self) -> f32;
}
