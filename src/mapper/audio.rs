//! Audio energy -> servo angle mapping
//!
//! Audio mode drives all five channels directly and continuously; no
//! edge detection and no sweep animation is involved.

/// Map a rolling energy estimate in [0,1] to an angle in [90,180].
///
/// Out-of-range estimates are clamped, so a noisy sampler can never
/// push an invalid angle toward the protocol boundary.
pub fn map(energy: f32) -> u8 {
    90 + (energy.clamp(0.0, 1.0) * 90.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        assert_eq!(map(0.0), 90);
        assert_eq!(map(0.5), 135);
        assert_eq!(map(1.0), 180);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(map(-0.3), 90);
        assert_eq!(map(2.5), 180);
        assert_eq!(map(f32::NAN), 90);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let mut last = 0;
        for step in 0..=100 {
            let angle = map(step as f32 / 100.0);
            assert!(angle >= last, "angle dropped at step {step}");
            last = angle;
        }
    }
}
