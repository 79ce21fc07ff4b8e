#![forbid(unsafe_code)]

//! Position validation: the caller's adjustment hook, then the neighbor
//! clamp.
//!
//! Every proposed position passes through [`validate`] before it is
//! committed. The clamp guarantees the non-crossing ordering; the separation
//! margin is applied or omitted per [`MarginPolicy`]. The non-mutating
//! [`can_advance`] gate exists only to decide whether the drag-move
//! notification fires; it never blocks the commit itself.

use trackbar_core::error::Error;
use trackbar_core::geometry::{PERCENT_EMPTY, PERCENT_FULL};

use crate::handles::HandleSet;

/// The caller-supplied position postprocessing hook.
///
/// Receives the handle index and the raw proposed percent; must return a
/// finite percent in `[0, 100]`. Anything else fails the interaction with
/// [`Error::InvalidHookOutput`].
pub type AdjustHook = dyn Fn(usize, f64) -> f64;

/// Whether the separation margin participates in the final neighbor clamp.
///
/// Historically both behaviors shipped: one slider applied the handle
/// half-width when clamping against neighbors, another deliberately disabled
/// it and let adjacent handles touch. Neither is the "correct" one; pick per
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginPolicy {
    /// Clamp against `neighbor ∓ margin`: handles keep visual separation.
    #[default]
    Strict,
    /// Clamp against the bare neighbor position: handles may touch.
    Lenient,
}

/// Validate a proposed percent position for one handle.
///
/// Applies the optional adjustment hook, then clamps the result into the
/// interval allowed by the neighboring handles (or the track ends where no
/// neighbor exists). When neighbors overlap more than the margin allows, the
/// lower bound wins, capped at the bare neighbor position so ordering is
/// preserved even when the margin cannot be.
///
/// # Errors
///
/// [`Error::InvalidHookOutput`] when the hook returns a non-finite value or
/// one outside `[0, 100]`. Handle positions are untouched in that case.
pub fn validate(
    handles: &HandleSet,
    index: usize,
    proposed: f64,
    hook: Option<&AdjustHook>,
    policy: MarginPolicy,
) -> Result<f64, Error> {
    let adjusted = match hook {
        Some(hook) => {
            let next = hook(index, proposed);
            if !next.is_finite() || !(PERCENT_EMPTY..=PERCENT_FULL).contains(&next) {
                return Err(Error::InvalidHookOutput {
                    handle: index,
                    returned: next,
                });
            }
            next
        }
        None => proposed,
    };

    let margin = match policy {
        MarginPolicy::Strict => handles.margin(),
        MarginPolicy::Lenient => 0.0,
    };

    let positions = handles.positions();
    let upper = match positions.get(index + 1) {
        Some(next) => next - margin,
        None => PERCENT_FULL,
    };
    let lower = if index > 0 {
        positions[index - 1] + margin
    } else {
        PERCENT_EMPTY
    };
    let clamped = adjusted.min(upper).max(lower);

    // The margin is a target, not a guarantee: when neighbors sit closer
    // than two margins the bounds invert and the lower bound wins above.
    // The bare neighbor positions are the hard limit: a commit may violate
    // the margin, never the ordering.
    let hard_upper = match positions.get(index + 1) {
        Some(next) => *next,
        None => PERCENT_FULL,
    };
    let hard_lower = if index > 0 {
        positions[index - 1]
    } else {
        PERCENT_EMPTY
    };

    Ok(clamped.min(hard_upper).max(hard_lower))
}

/// Whether the RAW proposed position could be taken without clamping.
///
/// False when the proposal is non-finite, outside `[0, 100]`, or would cross
/// a margin-adjusted neighbor bound. The margin applies here under every
/// [`MarginPolicy`]. This gate only controls the drag-move notification; the
/// clamped position is committed regardless.
#[must_use]
pub fn can_advance(handles: &HandleSet, index: usize, proposed: f64) -> bool {
    if !proposed.is_finite() {
        return false;
    }
    if proposed < PERCENT_EMPTY || proposed > PERCENT_FULL {
        return false;
    }

    let margin = handles.margin();
    let positions = handles.positions();

    if let Some(next) = positions.get(index + 1) {
        if proposed > next - margin {
            return false;
        }
    }
    if index > 0 {
        return proposed >= positions[index - 1] + margin;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LinearScale;

    fn set(values: &[f64]) -> HandleSet {
        HandleSet::new(values.to_vec(), 0.0, 100.0, &LinearScale)
    }

    fn set_with_margin(values: &[f64], margin_px: f64, track_px: f64) -> HandleSet {
        let mut s = set(values);
        s.set_handle_extent(margin_px, track_px);
        s
    }

    // === clamp ===

    #[test]
    fn clamps_to_track_ends_without_neighbors() {
        let s = set(&[50.0]);
        assert_eq!(validate(&s, 0, -10.0, None, MarginPolicy::Strict), Ok(0.0));
        assert_eq!(validate(&s, 0, 110.0, None, MarginPolicy::Strict), Ok(100.0));
        assert_eq!(validate(&s, 0, 42.0, None, MarginPolicy::Strict), Ok(42.0));
    }

    #[test]
    fn strict_policy_reserves_the_margin() {
        // 8px handle on a 100px track -> 4 percent half-width.
        let s = set_with_margin(&[20.0, 80.0], 8.0, 100.0);
        assert_eq!(validate(&s, 0, 95.0, None, MarginPolicy::Strict), Ok(76.0));
        assert_eq!(validate(&s, 1, 5.0, None, MarginPolicy::Strict), Ok(24.0));
    }

    #[test]
    fn lenient_policy_lets_handles_touch() {
        let s = set_with_margin(&[20.0, 80.0], 8.0, 100.0);
        assert_eq!(validate(&s, 0, 95.0, None, MarginPolicy::Lenient), Ok(80.0));
        assert_eq!(validate(&s, 1, 5.0, None, MarginPolicy::Lenient), Ok(20.0));
    }

    #[test]
    fn lower_bound_wins_when_margins_overlap() {
        // Handles closer together than two margins: the interval is empty
        // and the outer max() pins the result to the lower bound, which here
        // coincides with the next handle.
        let s = set_with_margin(&[50.0, 52.0, 54.0], 8.0, 100.0);
        assert_eq!(validate(&s, 1, 52.0, None, MarginPolicy::Strict), Ok(54.0));
    }

    #[test]
    fn overlapping_margins_never_cross_the_neighbor() {
        // The inverted bounds would land past the next handle; the bare
        // neighbor position is the hard limit.
        let s = set_with_margin(&[50.0, 51.0, 52.0], 8.0, 100.0);
        assert_eq!(validate(&s, 1, 51.0, None, MarginPolicy::Strict), Ok(52.0));
    }

    // === hook ===

    #[test]
    fn hook_output_feeds_the_clamp() {
        let s = set(&[20.0, 80.0]);
        let hook = |_: usize, proposed: f64| proposed.clamp(0.0, 40.0);
        let result = validate(&s, 0, 70.0, Some(&hook), MarginPolicy::Strict);
        assert_eq!(result, Ok(40.0));
    }

    #[test]
    fn hook_may_exceed_naive_neighbor_bounds() {
        // The hook can push past a neighbor; the clamp still resolves it.
        let s = set(&[20.0, 80.0]);
        let hook = |_: usize, _: f64| 99.0;
        assert_eq!(
            validate(&s, 0, 30.0, Some(&hook), MarginPolicy::Strict),
            Ok(80.0)
        );
    }

    #[test]
    fn out_of_range_hook_is_fatal() {
        let s = set(&[20.0, 80.0]);
        let hook = |_: usize, _: f64| 150.0;
        assert_eq!(
            validate(&s, 0, 30.0, Some(&hook), MarginPolicy::Strict),
            Err(Error::InvalidHookOutput {
                handle: 0,
                returned: 150.0,
            })
        );
    }

    #[test]
    fn nan_hook_is_fatal() {
        let s = set(&[20.0, 80.0]);
        let hook = |_: usize, _: f64| f64::NAN;
        let result = validate(&s, 0, 30.0, Some(&hook), MarginPolicy::Strict);
        assert!(matches!(
            result,
            Err(Error::InvalidHookOutput { handle: 0, .. })
        ));
    }

    #[test]
    fn negative_hook_is_fatal() {
        let s = set(&[20.0, 80.0]);
        let hook = |_: usize, _: f64| -0.5;
        assert!(validate(&s, 0, 30.0, Some(&hook), MarginPolicy::Strict).is_err());
    }

    // === can_advance ===

    #[test]
    fn advance_rejects_out_of_track_proposals() {
        let s = set(&[50.0]);
        assert!(!can_advance(&s, 0, -0.1));
        assert!(!can_advance(&s, 0, 100.1));
        assert!(!can_advance(&s, 0, f64::NAN));
        assert!(can_advance(&s, 0, 0.0));
        assert!(can_advance(&s, 0, 100.0));
    }

    #[test]
    fn advance_respects_margin_under_every_policy() {
        let s = set_with_margin(&[20.0, 80.0], 8.0, 100.0);
        // margin = 4: handle 0 may advance up to 76, handle 1 down to 24.
        assert!(can_advance(&s, 0, 76.0));
        assert!(!can_advance(&s, 0, 77.0));
        assert!(can_advance(&s, 1, 24.0));
        assert!(!can_advance(&s, 1, 23.0));
    }

    #[test]
    fn advance_ignores_clamping_outcome() {
        // The gate is independent of what validate() would commit.
        let s = set(&[20.0, 80.0]);
        assert!(!can_advance(&s, 0, 95.0));
        assert_eq!(validate(&s, 0, 95.0, None, MarginPolicy::Strict), Ok(80.0));
    }
}
