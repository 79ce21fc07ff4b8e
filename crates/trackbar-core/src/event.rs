#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! Adapters that own real input sources (mouse listeners, touch surfaces,
//! test scripts) translate their native events into [`PointerEvent`]s and
//! feed them to the engine's dispatcher. Adapters that prefer direct method
//! calls can skip this type entirely; it exists so event-stream shaped hosts
//! have a single alphabet to forward.
//!
//! # Design Notes
//!
//! - Coordinates are pixels in the same space as the track bounding box.
//! - A well-formed interaction is `Down` → zero or more `Move` → `Up`.
//! - `SecondaryContact` reports an additional simultaneous contact point;
//!   the engine treats it as an end-of-drag signal, never an error.
//! - `TrackPress` is a press on the track body (not on a handle); hit-testing
//!   the handles themselves stays on the adapter side.

/// A pointer event in track-pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer went down on a handle.
    Down {
        /// Index of the pressed handle.
        handle: usize,
    },

    /// The pointer moved while held.
    Move {
        /// Pointer x in pixels.
        x: f64,
        /// Pointer y in pixels.
        y: f64,
    },

    /// The pointer was released.
    Up,

    /// A second simultaneous contact point appeared (multi-touch).
    SecondaryContact,

    /// A press landed on the track body rather than a handle.
    TrackPress {
        /// Pointer x in pixels.
        x: f64,
        /// Pointer y in pixels.
        y: f64,
    },
}

impl PointerEvent {
    /// Returns true for [`PointerEvent::Move`].
    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    /// The pointer coordinates carried by this event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Move { x, y } | Self::TrackPress { x, y } => Some((x, y)),
            _ => None,
        }
    }
}
