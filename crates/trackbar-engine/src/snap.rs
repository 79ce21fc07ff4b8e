#![forbid(unsafe_code)]

//! Snapping: resolving a released handle to the nearest allowed value.

use crate::scale::Scale;

/// Resolves values against a fixed set of allowed snap points.
///
/// With snapping disabled or an empty point set, every operation is the
/// identity. Ties between two equidistant points resolve to the point
/// encountered first in the configured order: a stable, deterministic,
/// order-dependent tie-break.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapResolver {
    enabled: bool,
    points: Vec<f64>,
}

impl SnapResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new(enabled: bool, points: Vec<f64>) -> Self {
        Self { enabled, points }
    }

    /// Create a disabled resolver.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether snapping applies on release.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The configured snap points, in configuration order.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// The snap point closest to `value`; `value` itself when the point set
    /// is empty.
    ///
    /// A linear scan with strict improvement: the first point encountered
    /// wins exact distance ties.
    #[must_use]
    pub fn resolve_value(&self, value: f64) -> f64 {
        let Some(&first) = self.points.first() else {
            return value;
        };
        let mut best = first;
        let mut best_distance = (first - value).abs();
        for &point in &self.points[1..] {
            let distance = (point - value).abs();
            if distance < best_distance {
                best = point;
                best_distance = distance;
            }
        }
        best
    }

    /// Snap-adjust a percent position: percent → value → nearest point →
    /// percent. Identity when snapping is disabled or no points exist.
    #[must_use]
    pub fn snap_percent(&self, percent: f64, scale: &dyn Scale, min: f64, max: f64) -> f64 {
        if !self.enabled || self.points.is_empty() {
            return percent;
        }
        let value = scale.to_value(percent, min, max);
        let snapped = self.resolve_value(value);
        scale.to_position(snapped, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LinearScale;
    use proptest::prelude::*;

    #[test]
    fn empty_set_is_identity() {
        let snap = SnapResolver::new(true, Vec::new());
        assert_eq!(snap.resolve_value(47.3), 47.3);
        assert_eq!(snap.snap_percent(47.3, &LinearScale, 0.0, 100.0), 47.3);
    }

    #[test]
    fn resolves_to_nearest_point() {
        let snap = SnapResolver::new(true, vec![0.0, 50.0, 100.0]);
        assert_eq!(snap.resolve_value(47.0), 50.0);
        assert_eq!(snap.resolve_value(20.0), 0.0);
        assert_eq!(snap.resolve_value(80.0), 100.0);
    }

    #[test]
    fn exact_tie_takes_the_first_configured_point() {
        let snap = SnapResolver::new(true, vec![40.0, 60.0]);
        assert_eq!(snap.resolve_value(50.0), 40.0);
        // Order-dependent by design: reversed configuration flips the winner.
        let snap = SnapResolver::new(true, vec![60.0, 40.0]);
        assert_eq!(snap.resolve_value(50.0), 60.0);
    }

    #[test]
    fn disabled_resolver_leaves_percent_alone() {
        let snap = SnapResolver::new(false, vec![0.0, 50.0, 100.0]);
        assert!(!snap.is_enabled());
        assert_eq!(snap.points(), &[0.0, 50.0, 100.0]);
        assert_eq!(snap.snap_percent(47.0, &LinearScale, 0.0, 100.0), 47.0);
    }

    #[test]
    fn default_resolver_is_disabled_and_empty() {
        let snap = SnapResolver::disabled();
        assert!(!snap.is_enabled());
        assert!(snap.points().is_empty());
        assert_eq!(snap.resolve_value(12.0), 12.0);
    }

    #[test]
    fn snap_percent_round_trips_through_the_value_domain() {
        let snap = SnapResolver::new(true, vec![0.0, 50.0, 100.0]);
        assert_eq!(snap.snap_percent(47.0, &LinearScale, 0.0, 100.0), 50.0);
    }

    #[test]
    fn snap_percent_under_shifted_bounds() {
        let snap = SnapResolver::new(true, vec![150.0]);
        // percent 47 of [100, 200] is value 147 -> snaps to 150 -> percent 50.
        assert_eq!(snap.snap_percent(47.0, &LinearScale, 100.0, 200.0), 50.0);
    }

    proptest! {
        #[test]
        fn resolve_is_idempotent(
            value in -1_000.0f64..1_000.0,
            points in proptest::collection::vec(-1_000.0f64..1_000.0, 0..8),
        ) {
            let snap = SnapResolver::new(true, points);
            let once = snap.resolve_value(value);
            prop_assert_eq!(snap.resolve_value(once), once);
        }

        #[test]
        fn resolved_value_is_a_configured_point(
            value in -1_000.0f64..1_000.0,
            points in proptest::collection::vec(-1_000.0f64..1_000.0, 1..8),
        ) {
            let snap = SnapResolver::new(true, points.clone());
            let resolved = snap.resolve_value(value);
            prop_assert!(points.contains(&resolved));
        }
    }
}
