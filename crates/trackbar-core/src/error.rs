#![forbid(unsafe_code)]

//! Error types for the slider engine.
//!
//! Only conditions that indicate a programming error in the caller are
//! surfaced as errors; transient host states (unmeasured handles, zero-width
//! tracks, empty snap sets) degrade gracefully instead.

use std::fmt;

/// Errors surfaced by the slider engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The caller-supplied position adjustment hook returned a non-finite
    /// value or one outside `[0, 100]`.
    ///
    /// This is fatal for the interaction: the proposed move is discarded and
    /// handle positions are left unchanged. It is never silently clamped,
    /// since it indicates broken caller logic rather than bad input.
    InvalidHookOutput {
        /// The handle whose move was being validated.
        handle: usize,
        /// The value the hook returned.
        returned: f64,
    },

    /// `min >= max` (or a non-finite bound) was supplied at configure time.
    DegenerateBounds {
        /// The rejected minimum.
        min: f64,
        /// The rejected maximum.
        max: f64,
    },

    /// An interaction targeted a handle index that does not exist.
    UnknownHandle {
        /// The requested handle index.
        index: usize,
        /// The number of handles in the set.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidHookOutput { handle, returned } => write!(
                f,
                "adjustment hook returned invalid position {returned} for handle {handle}; \
                 valid positions are finite floats between 0 and 100"
            ),
            Self::DegenerateBounds { min, max } => {
                write!(f, "degenerate value bounds: min {min} must be below max {max}")
            }
            Self::UnknownHandle { index, len } => {
                write!(f, "handle index {index} out of range for {len} handle(s)")
            }
        }
    }
}

impl std::error::Error for Error {}
