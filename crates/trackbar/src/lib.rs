#![forbid(unsafe_code)]

//! Trackbar public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the engine and core types and offers a lightweight prelude for
//! day-to-day usage.
//!
//! # Example
//!
//! ```
//! use trackbar::prelude::*;
//!
//! let mut slider = SliderController::with_values(
//!     SliderConfig::new()
//!         .with_snap(true)
//!         .with_snap_points(vec![0.0, 50.0, 100.0]),
//!     vec![20.0, 80.0],
//! )?;
//!
//! let track = TrackRect::from_size(400.0, 20.0);
//! slider.start_drag(0)?;
//! slider.drag_move(190.0, 10.0, track)?;
//! slider.end_drag()?;
//! assert_eq!(slider.values(), &[50.0, 80.0]);
//! # Ok::<(), trackbar::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use trackbar_core::coalesce::MoveCoalescer;
pub use trackbar_core::error::Error;
pub use trackbar_core::event::PointerEvent;
pub use trackbar_core::geometry::{Orientation, PERCENT_EMPTY, PERCENT_FULL, TrackRect};

// --- Engine re-exports -----------------------------------------------------

pub use trackbar_engine::config::SliderConfig;
pub use trackbar_engine::controller::{DragState, SliderController, SliderObserver};
pub use trackbar_engine::handles::{HandleSet, Snapshot};
pub use trackbar_engine::scale::{GeometricScale, LinearScale, Scale};
pub use trackbar_engine::snap::SnapResolver;
pub use trackbar_engine::validate::{AdjustHook, MarginPolicy};

// --- Prelude ---------------------------------------------------------------

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{
        DragState, Error, GeometricScale, LinearScale, MarginPolicy, MoveCoalescer, Orientation,
        PointerEvent, Scale, SliderConfig, SliderController, SliderObserver, Snapshot, TrackRect,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_round_trip() {
        let mut slider =
            SliderController::with_values(SliderConfig::new(), vec![20.0, 80.0]).unwrap();
        let track = TrackRect::from_size(200.0, 10.0);
        slider.start_drag(0).unwrap();
        slider.drag_move(100.0, 5.0, track).unwrap();
        slider.end_drag().unwrap();
        assert_eq!(slider.values(), &[50.0, 80.0]);
    }

    #[test]
    fn prelude_names_resolve() {
        let _ = LinearScale;
        let _ = GeometricScale;
        let _ = MarginPolicy::Lenient;
        let _ = DragState::Idle;
        let _: Option<Snapshot> = None;
        let _ = MoveCoalescer::new();
        let _ = PointerEvent::Up;
        let _ = Orientation::Vertical;
        let _: Option<Error> = None;
    }
}
