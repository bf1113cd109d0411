//! Orientation helpers for gradient-driven region growing.
use std::f32::consts::{FRAC_PI_2, PI};

/// Fold an angle into [0, π); directions π apart map to the same value.
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Wrap an angle into (−π, π].
#[inline]
pub fn normalize_signed_pi(angle: f32) -> f32 {
    let mut norm = angle.rem_euclid(2.0 * PI);
    if norm > PI {
        norm -= 2.0 * PI;
    }
    norm
}

/// Smallest unsigned difference between two orientations, π-periodic.
/// Result lies in [0, π/2].
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Smallest unsigned difference between two directions, 2π-periodic.
#[inline]
pub fn signed_angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(2.0 * PI);
    if diff > PI {
        2.0 * PI - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn half_pi_folds_negative_and_wrapped_angles() {
        assert_abs_diff_eq!(normalize_half_pi(0.5), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_half_pi(-FRAC_PI_4), 3.0 * FRAC_PI_4, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_half_pi(PI), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_half_pi(3.0 * PI), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orientation_difference_ignores_polarity() {
        assert_abs_diff_eq!(angular_difference(0.0, PI), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2, epsilon = 1e-5);
        assert_abs_diff_eq!(angular_difference(FRAC_PI_4, -FRAC_PI_4), FRAC_PI_2, epsilon = 1e-5);
        assert_abs_diff_eq!(angular_difference(0.25, 1.7), angular_difference(1.7, 0.25));
    }

    #[test]
    fn signed_difference_keeps_polarity() {
        assert_abs_diff_eq!(signed_angular_difference(0.0, PI), PI, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_signed_pi(1.5 * PI), -0.5 * PI, epsilon = 1e-5);
        assert_abs_diff_eq!(
            signed_angular_difference(normalize_signed_pi(3.0), normalize_signed_pi(-3.0)),
            2.0 * PI - 6.0,
            epsilon = 1e-4
        );
    }
}
