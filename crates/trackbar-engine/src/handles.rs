#![forbid(unsafe_code)]

//! The ordered handle set: parallel percent positions and mapped values.
//!
//! [`HandleSet`] owns the two parallel vectors that describe every handle on
//! the track. Index is handle identity; positions are non-decreasing left to
//! right. The separation margin (`handle half-width in percent`) is a target,
//! not a guarantee: margin violations are tolerated, crossing is not.
//!
//! # Invariants
//!
//! 1. `positions.len() == values.len()` at all times.
//! 2. After [`commit`](HandleSet::commit), `positions[i] >= positions[i-1]`
//!    for every adjacent pair (validation upstream guarantees the committed
//!    position is clamped into its neighbor interval).
//! 3. `values` is always the full remap of `positions` through the current
//!    scale, never a partial update, so a concurrent bounds change can not
//!    leave a stale entry behind.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Unmeasured handle extent | First layout has not happened | margin `0` |
//! | Degenerate track extent | Host has zero-size layout | margin `0` |
//! | Out-of-order bulk values | External model binding | raised to predecessor |

use crate::scale::Scale;

/// An immutable view of the handle set after a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Percent positions, index = handle identity.
    pub positions: Vec<f64>,
    /// Mapped values, parallel to `positions`.
    pub values: Vec<f64>,
}

/// Ordered percent positions and values for every handle on one track.
#[derive(Debug, Clone)]
pub struct HandleSet {
    positions: Vec<f64>,
    values: Vec<f64>,
    min: f64,
    max: f64,
    margin: f64,
    attached: usize,
}

impl HandleSet {
    /// Create a handle set from initial values.
    ///
    /// Initial values are mapped to positions as supplied; the bulk repair
    /// rules of [`update_values`](Self::update_values) apply only to later
    /// external writes.
    #[must_use]
    pub fn new(values: Vec<f64>, min: f64, max: f64, scale: &dyn Scale) -> Self {
        let mut set = Self {
            positions: Vec::new(),
            values,
            min,
            max,
            margin: 0.0,
            attached: 0,
        };
        set.sync_positions(scale);
        set
    }

    /// Create the historical two-handle default set, seeded at `[10, 90]`.
    #[must_use]
    pub fn seeded(min: f64, max: f64, scale: &dyn Scale) -> Self {
        Self::new(vec![10.0, 90.0], min, max, scale)
    }

    /// Percent positions, non-decreasing left to right.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Mapped values, parallel to the positions.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true when the set has no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lower bound of the value domain.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the value domain.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current separation margin: the handle half-width in percent units.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// One handle's percent position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        self.positions[index]
    }

    /// Replace the value-domain bounds.
    ///
    /// Callers must re-run [`sync_positions`](Self::sync_positions) after a
    /// bounds change; the controller's configure path does both.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Recompute the separation margin from a measured handle pixel extent
    /// and the track's pixel extent along the main axis.
    ///
    /// Either extent being unmeasured, non-finite, or non-positive degrades
    /// to margin `0` (the pre-layout state).
    pub fn set_handle_extent(&mut self, handle_px: f64, track_px: f64) {
        self.margin = if handle_px.is_finite() && handle_px > 0.0 && track_px.is_finite() && track_px > 0.0
        {
            (handle_px / track_px * 100.0) / 2.0
        } else {
            0.0
        };
    }

    /// Remap every value to a position through the scale.
    ///
    /// Called at initialization and whenever bounds or scale change
    /// externally.
    pub fn sync_positions(&mut self, scale: &dyn Scale) {
        self.positions = self
            .values
            .iter()
            .map(|&value| scale.to_position(value, self.min, self.max))
            .collect();
    }

    /// Replace one position and recompute the ENTIRE values vector.
    ///
    /// Every value is remapped, not just the changed handle, so positions and
    /// values stay consistent even if the bounds changed since the last
    /// commit. Returns the resulting snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Debug builds additionally assert
    /// the non-crossing ordering that upstream validation guarantees.
    pub fn commit(&mut self, index: usize, new_position: f64, scale: &dyn Scale) -> Snapshot {
        self.positions[index] = new_position;
        self.values = self
            .positions
            .iter()
            .map(|&pos| scale.to_value(pos, self.min, self.max))
            .collect();

        debug_assert!(
            self.positions.windows(2).all(|pair| pair[0] <= pair[1]),
            "committed position crosses a neighbor: {:?}",
            self.positions
        );

        Snapshot {
            positions: self.positions.clone(),
            values: self.values.clone(),
        }
    }

    /// Attach one model-bound handle, returning its index.
    ///
    /// The first attached handle REPLACES the seeded placeholder array with a
    /// single value-`0` handle; every later attach appends another value-`0`
    /// handle. This first-vs-subsequent asymmetry is long-standing observable
    /// behavior for model-bound hosts and is kept intact.
    pub fn attach_handle(&mut self, scale: &dyn Scale) -> usize {
        if self.attached == 0 {
            self.values = vec![0.0];
        } else {
            self.values.push(0.0);
        }
        self.attached += 1;
        self.sync_positions(scale);
        self.attached - 1
    }

    /// Index of the handle whose position is nearest `percent`.
    ///
    /// Exact ties resolve to the lower index (the reduction keeps the first
    /// encountered minimum). Returns `0` for an empty set; callers guard
    /// emptiness.
    #[must_use]
    pub fn closest_handle(&self, percent: f64) -> usize {
        let mut closest = 0;
        for index in 1..self.positions.len() {
            let challenger = (self.positions[index] - percent).abs();
            let current = (self.positions[closest] - percent).abs();
            if challenger < current {
                closest = index;
            }
        }
        closest
    }

    /// The filled span rendered behind a handle: `[previous position, own
    /// position]`, where handle `0`'s span starts at `0`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn progress_segment(&self, index: usize) -> (f64, f64) {
        let start = if index == 0 {
            0.0
        } else {
            self.positions[index - 1]
        };
        (start, self.positions[index])
    }

    /// Bulk external write: clamp each value into `[min, max]`, raise any
    /// value below its (repaired) predecessor, then remap positions.
    pub fn update_values(&mut self, new_values: &[f64], scale: &dyn Scale) {
        let mut repaired: Vec<f64> = Vec::with_capacity(new_values.len());
        for &value in new_values {
            let mut real = value.min(self.max).max(self.min);
            if let Some(&prev) = repaired.last() {
                if real < prev {
                    real = prev;
                }
            }
            repaired.push(real);
        }
        self.values = repaired;
        self.sync_positions(scale);
    }
}
