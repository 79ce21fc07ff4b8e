#![forbid(unsafe_code)]

//! Slider configuration.

use trackbar_core::error::Error;
use trackbar_core::geometry::Orientation;

use crate::validate::MarginPolicy;

/// Configuration for a slider controller.
///
/// Checked once at construction / reconfigure time; interactions never
/// re-validate the bounds mid-drag.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    /// Lower bound of the value domain.
    pub min: f64,
    /// Upper bound of the value domain; must exceed `min`.
    pub max: f64,
    /// Which pixel axis maps to the percent domain.
    pub orientation: Orientation,
    /// Whether released handles snap to the nearest snap point.
    pub snap: bool,
    /// The allowed snap values; empty means snapping is a no-op.
    pub snap_points: Vec<f64>,
    /// Measured handle extent along the main axis, in pixels (`0` while
    /// unmeasured).
    pub handle_extent_px: f64,
    /// Whether the separation margin participates in the final clamp.
    pub margin_policy: MarginPolicy,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            orientation: Orientation::Horizontal,
            snap: false,
            snap_points: Vec::new(),
            handle_extent_px: 0.0,
            margin_policy: MarginPolicy::Strict,
        }
    }
}

impl SliderConfig {
    /// Create the default configuration: bounds `[0, 100]`, horizontal, no
    /// snapping, strict margin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value-domain bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enable or disable snapping on release.
    #[must_use]
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Set the snap points.
    #[must_use]
    pub fn with_snap_points(mut self, points: Vec<f64>) -> Self {
        self.snap_points = points;
        self
    }

    /// Set the measured handle extent in pixels.
    #[must_use]
    pub fn with_handle_extent(mut self, px: f64) -> Self {
        self.handle_extent_px = px;
        self
    }

    /// Set the margin policy for the final clamp.
    #[must_use]
    pub fn with_margin_policy(mut self, policy: MarginPolicy) -> Self {
        self.margin_policy = policy;
        self
    }

    /// Check the configuration for degenerate bounds.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] unless `min < max` (non-finite bounds fail
    /// the comparison and are rejected too).
    pub fn validate(&self) -> Result<(), Error> {
        if self.min < self.max {
            Ok(())
        } else {
            Err(Error::DegenerateBounds {
                min: self.min,
                max: self.max,
            })
        }
    }
}
