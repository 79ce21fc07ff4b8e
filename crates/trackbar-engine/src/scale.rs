#![forbid(unsafe_code)]

//! Scale strategies: the pluggable mapping between the value domain
//! `[min, max]` and the percent domain `[0, 100]`.
//!
//! A [`Scale`] must be monotonic non-decreasing over `[min, max]` with range
//! `[0, 100]`, and `to_value` must invert `to_position` to within the
//! consumer's rounding tolerance. Both built-in scales round values to the
//! nearest integer: the value domain is deliberately integral regardless of
//! the precision of the configured bounds.

use trackbar_core::geometry::{PERCENT_EMPTY, PERCENT_FULL};

/// Conversion between values and percent positions.
///
/// Implementations are stateless strategies; the engine holds one behind a
/// `Box<dyn Scale>` and threads it through every position/value resync.
pub trait Scale {
    /// Map a value in `[min, max]` to a percent position in `[0, 100]`.
    fn to_position(&self, value: f64, min: f64, max: f64) -> f64;

    /// Map a percent position in `[0, 100]` back to a value in `[min, max]`.
    fn to_value(&self, position: f64, min: f64, max: f64) -> f64;
}

/// Direct affine mapping between values and positions.
///
/// The two boundary positions are special-cased with an exact equality check:
/// `to_value(0) == min` and `to_value(100) == max` regardless of the bounds'
/// magnitude, so floating-point drift elsewhere can never misreport the
/// extremes. All other positions round to the nearest integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearScale;

impl Scale for LinearScale {
    fn to_position(&self, value: f64, min: f64, max: f64) -> f64 {
        (value - min) / (max - min) * PERCENT_FULL
    }

    fn to_value(&self, position: f64, min: f64, max: f64) -> f64 {
        if position == PERCENT_EMPTY {
            return min;
        }
        if position == PERCENT_FULL {
            return max;
        }
        ((max - min) * (position / PERCENT_FULL) + min).round()
    }
}

/// Square-root scaling of the normalized domain, producing a denser low end.
///
/// `to_position` and `to_value` are NOT exact inverses: `to_position`
/// normalizes by `max` where `to_value` inverts against `max - min`. The
/// asymmetry is intentional, long-standing behavior that callers rely on;
/// treat the pair as approximate and do not "correct" either formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometricScale;

impl Scale for GeometricScale {
    fn to_position(&self, value: f64, min: f64, max: f64) -> f64 {
        (max / (max - min)).sqrt() * ((value - min) / max).sqrt() * PERCENT_FULL
    }

    fn to_value(&self, position: f64, min: f64, max: f64) -> f64 {
        ((position / PERCENT_FULL).powi(2) * (max - min)).round() + min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // === LinearScale ===

    #[test]
    fn linear_position_is_affine() {
        let s = LinearScale;
        assert_eq!(s.to_position(0.0, 0.0, 100.0), 0.0);
        assert_eq!(s.to_position(50.0, 0.0, 100.0), 50.0);
        assert_eq!(s.to_position(100.0, 0.0, 100.0), 100.0);
        assert_eq!(s.to_position(150.0, 100.0, 200.0), 50.0);
    }

    #[test]
    fn linear_value_rounds_to_integer() {
        let s = LinearScale;
        assert_eq!(s.to_value(33.0, 0.0, 10.0), 3.0);
        assert_eq!(s.to_value(37.0, 0.0, 10.0), 4.0);
    }

    #[test]
    fn linear_boundaries_are_exact() {
        let s = LinearScale;
        // Bounds chosen so the affine path would drift without the equality
        // check on the boundary positions.
        let (min, max) = (0.1, 1_000_000.3);
        assert_eq!(s.to_value(0.0, min, max), min);
        assert_eq!(s.to_value(100.0, min, max), max);
        let (min, max) = (-7.7, 13.9);
        assert_eq!(s.to_value(0.0, min, max), min);
        assert_eq!(s.to_value(100.0, min, max), max);
    }

    #[test]
    fn linear_round_trip_on_integers() {
        let s = LinearScale;
        for v in 0..=100 {
            let v = f64::from(v);
            assert_eq!(s.to_value(s.to_position(v, 0.0, 100.0), 0.0, 100.0), v);
        }
    }

    // === GeometricScale ===

    #[test]
    fn geometric_matches_documented_formulas() {
        let s = GeometricScale;
        let (min, max): (f64, f64) = (0.0, 100.0);
        let expected = (max / (max - min)).sqrt() * ((25.0 - min) / max).sqrt() * 100.0;
        assert_eq!(s.to_position(25.0, min, max), expected);
        assert_eq!(s.to_value(50.0, min, max), 25.0);
        assert_eq!(s.to_value(100.0, min, max), 100.0);
    }

    #[test]
    fn geometric_endpoints() {
        let s = GeometricScale;
        assert_eq!(s.to_position(0.0, 0.0, 100.0), 0.0);
        assert_eq!(s.to_position(100.0, 0.0, 100.0), 100.0);
        assert_eq!(s.to_value(0.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn geometric_is_denser_near_the_low_end() {
        let s = GeometricScale;
        // Equal value steps cover more percent at the low end than the high.
        let low_span = s.to_position(10.0, 0.0, 100.0) - s.to_position(0.0, 0.0, 100.0);
        let high_span = s.to_position(100.0, 0.0, 100.0) - s.to_position(90.0, 0.0, 100.0);
        assert!(low_span > high_span);
    }

    proptest! {
        #[test]
        fn linear_round_trip_within_rounding(v in 0.0f64..=100.0) {
            let s = LinearScale;
            let back = s.to_value(s.to_position(v, 0.0, 100.0), 0.0, 100.0);
            prop_assert!((back - v).abs() <= 0.5);
        }

        #[test]
        fn linear_position_is_monotonic(
            a in -1_000.0f64..1_000.0,
            b in -1_000.0f64..1_000.0,
        ) {
            let s = LinearScale;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.to_position(lo, -1_000.0, 1_000.0) <= s.to_position(hi, -1_000.0, 1_000.0));
        }

        #[test]
        fn geometric_position_is_monotonic_over_domain(
            a in 0.0f64..=100.0,
            b in 0.0f64..=100.0,
        ) {
            let s = GeometricScale;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.to_position(lo, 0.0, 100.0) <= s.to_position(hi, 0.0, 100.0));
        }
    }
}
