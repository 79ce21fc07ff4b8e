#![forbid(unsafe_code)]

//! The trackbar handle-position engine.
//!
//! Converts pointer movement into validated, non-crossing handle positions,
//! maps between a value domain and a percent domain through a pluggable
//! scale, and optionally snaps released handles to a fixed set of allowed
//! values. Host integration (event capture, rendering, form binding) lives in
//! adapters built on [`controller::SliderController`]'s contract.

pub mod config;
pub mod controller;
pub mod handles;
pub mod scale;
pub mod snap;
pub mod validate;

pub use config::SliderConfig;
pub use controller::{DragState, SliderController, SliderObserver};
pub use handles::{HandleSet, Snapshot};
pub use scale::{GeometricScale, LinearScale, Scale};
pub use snap::SnapResolver;
pub use validate::{AdjustHook, MarginPolicy, can_advance, validate};
