//! Angle-to-segment resolution.
//!
//! Segments are laid out clockwise from 12 o'clock in list order, each
//! covering `360 / count` degrees. The wheel turns clockwise under a fixed
//! pointer at 12 o'clock, so the segment under the pointer is the one found
//! by walking *backwards* from the reference by the wheel's rotation.
//!
//! ```text
//! normalized = (360 - angle mod 360) mod 360
//! index      = floor(normalized / step) mod count
//! ```
//!
//! Segments are half-open `[k*step, (k+1)*step)` in normalized space, and
//! the index is always taken with `floor`, never rounded.

use std::num::NonZeroUsize;

const FULL_TURN: f64 = 360.0;

/// Angular share of one segment, in degrees.
pub fn segment_angle(segment_count: NonZeroUsize) -> f64 {
    FULL_TURN / segment_count.get() as f64
}

/// Clockwise start angle of segment `index` on an unrotated wheel.
pub fn segment_start(index: usize, segment_count: NonZeroUsize) -> f64 {
    (index % segment_count.get()) as f64 * segment_angle(segment_count)
}

/// Wrap any angle into `[0, 360)`.
pub fn normalize(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(FULL_TURN);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Index of the segment under the pointer after the wheel has turned
/// clockwise by `final_angle_deg`.
///
/// Non-finite angles resolve to segment 0.
pub fn resolve(final_angle_deg: f64, segment_count: NonZeroUsize) -> usize {
    if !final_angle_deg.is_finite() {
        return 0;
    }
    let count = segment_count.get();
    let normalized = normalize(FULL_TURN - normalize(final_angle_deg));
    let index = (normalized / segment_angle(segment_count)).floor() as usize;
    index % count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn zero_rotation_selects_first_segment() {
        for count in 1..=12 {
            assert_eq!(resolve(0.0, n(count)), 0);
        }
    }

    #[test]
    fn quarter_wheel_example() {
        // step 90, normalized (360 - 100) = 260, floor(260 / 90) = 2
        assert_eq!(resolve(100.0, n(4)), 2);
        assert_eq!(resolve(100.0 + 360.0 * 7.0, n(4)), 2);
    }

    #[test]
    fn whole_turns_are_ignored() {
        assert_eq!(resolve(1800.0, n(3)), 0);
        assert_eq!(resolve(-90.0, n(4)), 1);
        assert_eq!(resolve(270.0, n(4)), 1);
    }

    #[test]
    fn normalized_boundaries_are_half_open() {
        // With 4 segments, rotating by 360 - 90k puts normalized exactly
        // on the start of segment k.
        let count = n(4);
        for k in 0..4 {
            let angle = normalize(360.0 - 90.0 * k as f64);
            assert_eq!(resolve(angle, count), k);
            // A hair less rotation moves normalized a hair past the start:
            // still segment k.
            assert_eq!(resolve(angle - 1e-9, count), k);
            // A hair more rotation falls back into the previous segment.
            assert_eq!(resolve(angle + 1e-9, count), (k + 3) % 4);
        }
    }

    #[test]
    fn rotation_on_a_segment_start_maps_to_mirrored_index() {
        // resolve(k * step) == (count - k) mod count
        let count = n(6);
        for k in 0..6 {
            assert_eq!(resolve(60.0 * k as f64, count), (6 - k) % 6);
        }
    }

    #[test]
    fn non_finite_angles_fall_back_to_first_segment() {
        assert_eq!(resolve(f64::NAN, n(5)), 0);
        assert_eq!(resolve(f64::INFINITY, n(5)), 0);
    }

    #[test]
    fn segment_layout_helpers() {
        assert_eq!(segment_angle(n(8)), 45.0);
        assert_eq!(segment_start(3, n(8)), 135.0);
        assert_eq!(segment_start(9, n(8)), 45.0);
        assert_eq!(normalize(-1e-20), 0.0);
        assert_eq!(normalize(725.0), 5.0);
    }
}
