#![forbid(unsafe_code)]

//! Core: track geometry, pointer events, error types, and logging for the
//! trackbar slider engine.

pub mod coalesce;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;

pub use coalesce::MoveCoalescer;
pub use error::Error;
pub use event::PointerEvent;
pub use geometry::{Orientation, PERCENT_EMPTY, PERCENT_FULL, TrackRect};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
