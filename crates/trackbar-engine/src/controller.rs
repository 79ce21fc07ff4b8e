#![forbid(unsafe_code)]

//! The drag state machine and the adapter-facing contract.
//!
//! [`SliderController`] is the single object an adapter talks to: it owns the
//! handle set, the scale, the snap resolver, and the transient drag state,
//! and it drives every mutation through validation so the non-crossing
//! ordering can never be violated.
//!
//! # State Machine
//!
//! States are [`DragState::Idle`] and [`DragState::Dragging`]:
//!
//! - `Idle → Dragging` on [`start_drag`](SliderController::start_drag).
//! - `Dragging → Dragging` on [`drag_move`](SliderController::drag_move):
//!   pointer → percent → validate → commit → notify.
//! - `Dragging → Idle` on [`end_drag`](SliderController::end_drag), with an
//!   optional snap settle commit between the drag-end and after-commit
//!   notifications.
//! - A second simultaneous contact
//!   ([`secondary_contact`](SliderController::secondary_contact)) forces the
//!   same release path; multi-touch is an end-of-drag signal, not an error.
//!
//! # Invariants
//!
//! 1. One drag at a time per controller; the state machine is the only
//!    writer, so no locking exists anywhere in the engine.
//! 2. Every move that passes validation is committed; there is no mid-drag
//!    abort that discards a change.
//! 3. `on_drag_end` always fires before the snap settle commit, and
//!    `on_after_commit` after it.
//! 4. `drag_move`/`end_drag` while `Idle` are no-ops: hosts may detach their
//!    listeners asynchronously and deliver stragglers.

use std::fmt;

use trackbar_core::error::Error;
use trackbar_core::event::PointerEvent;
use trackbar_core::geometry::{Orientation, TrackRect};
use trackbar_core::{debug, trace};

use crate::config::SliderConfig;
use crate::handles::{HandleSet, Snapshot};
use crate::scale::{LinearScale, Scale};
use crate::snap::SnapResolver;
use crate::validate::{AdjustHook, MarginPolicy, can_advance, validate};

// ---------------------------------------------------------------------------
// DragState
// ---------------------------------------------------------------------------

/// Transient drag state, one per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No handle is under pointer control.
    #[default]
    Idle,
    /// One handle is being dragged.
    Dragging {
        /// Index of the controlled handle.
        handle: usize,
    },
}

impl DragState {
    /// The dragged handle's index, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<usize> {
        match *self {
            Self::Dragging { handle } => Some(handle),
            Self::Idle => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SliderObserver
// ---------------------------------------------------------------------------

/// Synchronous notifications from the engine back to the adapter.
///
/// Every method has an empty default body: an adapter implements only what it
/// renders or forwards. Absence of an observer is equally a no-op.
pub trait SliderObserver {
    /// A drag began on some handle.
    fn on_drag_start(&mut self) {}

    /// A drag move was accepted without clamping (see
    /// [`can_advance`](crate::validate::can_advance) for the gate).
    fn on_drag_move(&mut self) {}

    /// A drag ended (pointer release or forced multi-touch end). Fires
    /// before any snap settle commit.
    fn on_drag_end(&mut self) {}

    /// Handle values changed; receives the full ordered value sequence.
    fn on_values_updated(&mut self, _values: &[f64]) {}

    /// A settled value set was committed (drag release after the optional
    /// snap settle, or a click-to-move).
    fn on_after_commit(&mut self) {}

    /// A click-to-move interaction completed.
    fn on_click(&mut self) {}
}

// ---------------------------------------------------------------------------
// SliderController
// ---------------------------------------------------------------------------

/// The handle-position engine: ordered handles, drag state machine, and the
/// adapter contract.
pub struct SliderController {
    handles: HandleSet,
    scale: Box<dyn Scale>,
    snap: SnapResolver,
    orientation: Orientation,
    margin_policy: MarginPolicy,
    handle_extent_px: f64,
    drag: DragState,
    observer: Option<Box<dyn SliderObserver>>,
    adjust: Option<Box<AdjustHook>>,
}

impl fmt::Debug for SliderController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderController")
            .field("drag", &self.drag)
            .field("handles", &self.handles)
            .field("orientation", &self.orientation)
            .finish()
    }
}

impl SliderController {
    /// Create a controller with the historical two-handle default set
    /// (`[10, 90]`) and the linear scale.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] when the configuration's bounds are
    /// invalid.
    pub fn new(config: SliderConfig) -> Result<Self, Error> {
        config.validate()?;
        let scale: Box<dyn Scale> = Box::new(LinearScale);
        let handles = HandleSet::seeded(config.min, config.max, scale.as_ref());
        Ok(Self::assemble(config, handles, scale))
    }

    /// Create a controller with caller-supplied initial values.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] when the configuration's bounds are
    /// invalid.
    pub fn with_values(config: SliderConfig, values: Vec<f64>) -> Result<Self, Error> {
        config.validate()?;
        let scale: Box<dyn Scale> = Box::new(LinearScale);
        let handles = HandleSet::new(values, config.min, config.max, scale.as_ref());
        Ok(Self::assemble(config, handles, scale))
    }

    fn assemble(config: SliderConfig, handles: HandleSet, scale: Box<dyn Scale>) -> Self {
        Self {
            handles,
            scale,
            snap: SnapResolver::new(config.snap, config.snap_points),
            orientation: config.orientation,
            margin_policy: config.margin_policy,
            handle_extent_px: config.handle_extent_px,
            drag: DragState::Idle,
            observer: None,
            adjust: None,
        }
    }

    /// Swap the scale strategy and remap every position.
    #[must_use]
    pub fn with_scale(mut self, scale: Box<dyn Scale>) -> Self {
        self.set_scale(scale);
        self
    }

    /// Install the notification observer.
    pub fn set_observer(&mut self, observer: Box<dyn SliderObserver>) {
        self.observer = Some(observer);
    }

    /// Remove the notification observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Install the position adjustment hook.
    ///
    /// The hook receives `(handle index, proposed percent)` and must return a
    /// finite percent in `[0, 100]`; see [`Error::InvalidHookOutput`].
    pub fn set_adjust_hook(&mut self, hook: Box<AdjustHook>) {
        self.adjust = Some(hook);
    }

    /// Remove the position adjustment hook.
    pub fn clear_adjust_hook(&mut self) {
        self.adjust = None;
    }

    // --- accessors ---------------------------------------------------------

    /// Current drag state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.drag
    }

    /// Returns true while a handle is under pointer control.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The handle values, ordered.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.handles.values()
    }

    /// The handle percent positions, ordered.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        self.handles.positions()
    }

    /// Read access to the handle set.
    #[must_use]
    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// The filled span behind a handle, for progress rendering.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn progress_segment(&self, index: usize) -> (f64, f64) {
        self.handles.progress_segment(index)
    }

    /// Map pit/tick values to percent positions for adapter rendering.
    #[must_use]
    pub fn pit_positions(&self, points: &[f64]) -> Vec<f64> {
        points
            .iter()
            .map(|&point| {
                self.scale
                    .to_position(point, self.handles.min(), self.handles.max())
            })
            .collect()
    }

    // --- configuration -----------------------------------------------------

    /// Apply a new configuration and remap every position.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateBounds`] when the new bounds are invalid; the
    /// previous configuration stays in effect.
    pub fn configure(&mut self, config: SliderConfig) -> Result<(), Error> {
        config.validate()?;
        self.handles.set_bounds(config.min, config.max);
        self.orientation = config.orientation;
        self.margin_policy = config.margin_policy;
        self.handle_extent_px = config.handle_extent_px;
        self.snap = SnapResolver::new(config.snap, config.snap_points);
        self.handles.sync_positions(self.scale.as_ref());
        Ok(())
    }

    /// Swap the scale strategy in place and remap every position.
    pub fn set_scale(&mut self, scale: Box<dyn Scale>) {
        self.scale = scale;
        self.handles.sync_positions(self.scale.as_ref());
    }

    // --- drag state machine ------------------------------------------------

    /// Begin dragging a handle.
    ///
    /// A drag already in progress is taken over by the new handle (hosts
    /// deliver at most one primary pointer, so this only happens when a
    /// release event was lost).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownHandle`] for an out-of-range index.
    pub fn start_drag(&mut self, handle: usize) -> Result<(), Error> {
        if handle >= self.handles.len() {
            return Err(Error::UnknownHandle {
                index: handle,
                len: self.handles.len(),
            });
        }
        trace!("drag start on handle {}", handle);
        self.drag = DragState::Dragging { handle };
        self.notify(|observer| observer.on_drag_start());
        Ok(())
    }

    /// Move the dragged handle to the pointer position.
    ///
    /// Converts the pointer to a percent along the track's main axis,
    /// validates, commits, and notifies. `on_drag_move` fires only when the
    /// raw proposed percent would have been accepted without clamping. A
    /// no-op while idle.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHookOutput`] from the adjustment hook; positions are
    /// unchanged in that case.
    pub fn drag_move(&mut self, x: f64, y: f64, track: TrackRect) -> Result<(), Error> {
        let DragState::Dragging { handle } = self.drag else {
            return Ok(());
        };
        self.handles
            .set_handle_extent(self.handle_extent_px, self.orientation.extent(track));
        let proposed = self.orientation.percent_at(track, x, y);
        let advanced = can_advance(&self.handles, handle, proposed);
        self.slide_to(handle, proposed)?;
        if advanced {
            self.notify(|observer| observer.on_drag_move());
        }
        Ok(())
    }

    /// End the drag.
    ///
    /// Fires `on_drag_end`, then (with snapping enabled) settles the
    /// dragged handle onto the nearest snap point with one extra
    /// validate/commit cycle, then fires `on_after_commit`. A no-op while
    /// idle. The controller returns to idle even when the settle commit
    /// fails.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHookOutput`] from the adjustment hook during the snap
    /// settle.
    pub fn end_drag(&mut self) -> Result<(), Error> {
        let DragState::Dragging { handle } = self.drag else {
            return Ok(());
        };
        trace!("drag end on handle {}", handle);
        self.notify(|observer| observer.on_drag_end());

        let settle = if self.snap.is_enabled() {
            let percent = self.handles.position(handle);
            let target = self.snap.snap_percent(
                percent,
                self.scale.as_ref(),
                self.handles.min(),
                self.handles.max(),
            );
            self.slide_to(handle, target).map(|_| ())
        } else {
            Ok(())
        };

        self.drag = DragState::Idle;
        settle?;
        self.notify(|observer| observer.on_after_commit());
        Ok(())
    }

    /// Report a second simultaneous contact point.
    ///
    /// Multi-touch is unsupported and treated as an end-of-drag signal: while
    /// dragging this forces the full release path; while idle it is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`end_drag`](Self::end_drag).
    pub fn secondary_contact(&mut self) -> Result<(), Error> {
        if self.is_dragging() {
            debug!("secondary contact while dragging; forcing release");
            self.end_drag()
        } else {
            Ok(())
        }
    }

    /// Click-to-move: move the handle closest to the clicked position.
    ///
    /// The target percent is snap-adjusted up front (identity with snapping
    /// off), then validated and committed for the closest handle, followed by
    /// `on_after_commit` and `on_click`. Ignored while dragging (the press
    /// that starts a drag is the adapter's handle hit, not a track click) and
    /// when no handles exist.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHookOutput`] from the adjustment hook.
    pub fn click(&mut self, x: f64, y: f64, track: TrackRect) -> Result<(), Error> {
        if self.is_dragging() {
            return Ok(());
        }
        if self.handles.is_empty() {
            debug!("click ignored: no handles");
            return Ok(());
        }
        self.handles
            .set_handle_extent(self.handle_extent_px, self.orientation.extent(track));
        let percent = self.orientation.percent_at(track, x, y);
        let handle = self.handles.closest_handle(percent);
        let target = self.snap.snap_percent(
            percent,
            self.scale.as_ref(),
            self.handles.min(),
            self.handles.max(),
        );
        self.slide_to(handle, target)?;
        self.notify(|observer| observer.on_after_commit());
        self.notify(|observer| observer.on_click());
        Ok(())
    }

    /// Dispatch one [`PointerEvent`] to the drag state machine.
    ///
    /// For adapters that forward an event stream rather than calling the
    /// methods directly.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched method returns.
    pub fn process(&mut self, event: PointerEvent, track: TrackRect) -> Result<(), Error> {
        match event {
            PointerEvent::Down { handle } => self.start_drag(handle),
            PointerEvent::Move { x, y } => self.drag_move(x, y, track),
            PointerEvent::Up => self.end_drag(),
            PointerEvent::SecondaryContact => self.secondary_contact(),
            PointerEvent::TrackPress { x, y } => self.click(x, y, track),
        }
    }

    // --- model binding -----------------------------------------------------

    /// Attach one model-bound handle, returning its index.
    ///
    /// See [`HandleSet::attach_handle`] for the first-vs-subsequent
    /// replacement behavior.
    pub fn attach_handle(&mut self) -> usize {
        self.handles.attach_handle(self.scale.as_ref())
    }

    /// Bulk external write of every handle value (two-way binding path).
    ///
    /// Values are clamped and order-repaired, positions remapped, and
    /// `on_values_updated` fired.
    pub fn set_values(&mut self, values: &[f64]) {
        self.handles.update_values(values, self.scale.as_ref());
        let updated = self.handles.values().to_vec();
        self.notify(|observer| observer.on_values_updated(&updated));
    }

    /// External write of a single handle value.
    ///
    /// Ignored while a drag is in progress, for a non-finite value, or for an
    /// out-of-range index: external bindings race against interactions and
    /// must never disturb one.
    pub fn set_value(&mut self, index: usize, value: f64) {
        if self.is_dragging() || !value.is_finite() || index >= self.handles.len() {
            debug!("single-value write ignored (index {})", index);
            return;
        }
        let mut next = self.handles.values().to_vec();
        next[index] = value;
        self.set_values(&next);
    }

    // --- internals ---------------------------------------------------------

    /// Validate and commit one handle position, then notify.
    fn slide_to(&mut self, handle: usize, proposed: f64) -> Result<Snapshot, Error> {
        let actual = validate(
            &self.handles,
            handle,
            proposed,
            self.adjust.as_deref(),
            self.margin_policy,
        )?;
        let snapshot = self.handles.commit(handle, actual, self.scale.as_ref());
        self.notify(|observer| observer.on_values_updated(&snapshot.values));
        Ok(snapshot)
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn SliderObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            f(observer);
        }
    }
}
