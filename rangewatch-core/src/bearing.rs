//! Bearing estimation for a sensor pair
//!
//! The two sensors of a pair sit `baseline_cm` apart facing the same way.
//! The difference between their distances over the baseline gives the
//! tangent of the angle the target makes with the pair's normal.

use core::f32::consts::PI;

/// Largest angle that can be shown in the two-digit field
pub const MAX_BEARING_DEG: u8 = 89;

/// Angle in whole degrees, 0..=89, for a pair of distances
///
/// Uses the absolute difference, so the result does not tell which side
/// the target is on. The fractional part is truncated.
pub fn bearing_angle(first_cm: u16, second_cm: u16, baseline_cm: f32) -> u8 {
    if baseline_cm.is_nan() || baseline_cm <= 0.0 {
        return 0;
    }

    let diff = f32::from(first_cm.abs_diff(second_cm));
    let degrees = libm::atanf(diff / baseline_cm) * 180.0 / PI;

    // Float to int casts saturate, and atan never exceeds 90 degrees
    (degrees as u8).min(MAX_BEARING_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASELINE: f32 = 8.0;

    #[test]
    fn test_equal_distances() {
        assert_eq!(bearing_angle(40, 40, BASELINE), 0);
        assert_eq!(bearing_angle(0, 0, BASELINE), 0);
    }

    #[test]
    fn test_known_angles() {
        // atan(12 / 8) = 56.3
        assert_eq!(bearing_angle(20, 8, BASELINE), 56);
        // atan(1) = 45
        assert_eq!(bearing_angle(16, 8, BASELINE), 45);
        // atan(1 / 8) = 7.1
        assert_eq!(bearing_angle(31, 30, BASELINE), 7);
    }

    #[test]
    fn test_large_difference_is_capped() {
        assert_eq!(bearing_angle(u16::MAX, 0, BASELINE), MAX_BEARING_DEG);
        assert_eq!(bearing_angle(1000, 0, BASELINE), MAX_BEARING_DEG);
    }

    #[test]
    fn test_invalid_baseline() {
        assert_eq!(bearing_angle(20, 8, 0.0), 0);
        assert_eq!(bearing_angle(20, 8, -1.0), 0);
        assert_eq!(bearing_angle(20, 8, f32::NAN), 0);
    }

    proptest! {
        #[test]
        fn angle_is_symmetric(a in any::<u16>(), b in any::<u16>()) {
            prop_assert_eq!(bearing_angle(a, b, BASELINE), bearing_angle(b, a, BASELINE));
        }

        #[test]
        fn angle_is_bounded(a in any::<u16>(), b in any::<u16>()) {
            prop_assert!(bearing_angle(a, b, BASELINE) <= MAX_BEARING_DEG);
        }

        #[test]
        fn angle_grows_with_difference(base in 0u16..1000, d1 in 0u16..500, d2 in 0u16..500) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(
                bearing_angle(base + lo, base, BASELINE) <= bearing_angle(base + hi, base, BASELINE)
            );
        }
    }
}
