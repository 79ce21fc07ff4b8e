#![forbid(unsafe_code)]

//! Pointer-move coalescing for high-frequency input.
//!
//! Hosts can deliver a flood of move events during a fast drag. Without
//! coalescing, each one triggers a validate/commit/notify cycle even though
//! only the latest position matters. [`MoveCoalescer`] keeps the most recent
//! pending [`PointerEvent::Move`] and releases it just before any
//! non-coalescable event, so delivery order is preserved.
//!
//! This is a scheduling optimization for adapters; engine correctness never
//! depends on it.
//!
//! # Design
//!
//! - Move events use a "latest wins" strategy: pushing a move replaces any
//!   pending move and delivers nothing.
//! - Every other event acts as a flush barrier: the pending move (if any) is
//!   delivered first, then the event itself.
//! - The caller drains [`flush`](MoveCoalescer::flush) at the end of each
//!   input batch (e.g. once per frame) to deliver a trailing move.
//!
//! # Usage
//!
//! ```
//! use trackbar_core::coalesce::MoveCoalescer;
//! use trackbar_core::event::PointerEvent;
//!
//! let mut coalescer = MoveCoalescer::new();
//!
//! // Rapid moves collapse; nothing is delivered yet.
//! assert_eq!(coalescer.push(PointerEvent::Move { x: 1.0, y: 0.0 }).count(), 0);
//! assert_eq!(coalescer.push(PointerEvent::Move { x: 2.0, y: 0.0 }).count(), 0);
//!
//! // A release flushes the latest move first, then passes through.
//! let delivered: Vec<_> = coalescer.push(PointerEvent::Up).collect();
//! assert_eq!(
//!     delivered,
//!     vec![PointerEvent::Move { x: 2.0, y: 0.0 }, PointerEvent::Up]
//! );
//! assert!(coalescer.flush().is_none());
//! ```

use crate::event::PointerEvent;

/// Coalesces high-frequency pointer moves to prevent event storms.
///
/// # Thread Safety
///
/// `MoveCoalescer` is not thread-safe. It belongs on the single event
/// processing thread, next to the controller it feeds.
///
/// # Performance
///
/// All operations are O(1); at most one move event is ever pending.
#[derive(Debug, Clone, Default)]
pub struct MoveCoalescer {
    /// Pending move event (latest position wins).
    pending: Option<PointerEvent>,
}

/// Events released by one [`MoveCoalescer::push`] call, in delivery order.
#[derive(Debug, Clone, Copy)]
pub struct Released {
    slots: [Option<PointerEvent>; 2],
    next: usize,
}

impl Iterator for Released {
    type Item = PointerEvent;

    fn next(&mut self) -> Option<PointerEvent> {
        while self.next < self.slots.len() {
            let slot = self.slots[self.next].take();
            self.next += 1;
            if slot.is_some() {
                return slot;
            }
        }
        None
    }
}

impl MoveCoalescer {
    /// Create a new coalescer with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event, receiving the events to deliver now, in order.
    ///
    /// A move is absorbed (empty result); anything else releases the pending
    /// move followed by the event itself.
    #[must_use]
    pub fn push(&mut self, event: PointerEvent) -> Released {
        if event.is_move() {
            self.pending = Some(event);
            return Released {
                slots: [None, None],
                next: 0,
            };
        }
        Released {
            slots: [self.pending.take(), Some(event)],
            next: 0,
        }
    }

    /// Drain the pending move, if any.
    #[must_use]
    pub fn flush(&mut self) -> Option<PointerEvent> {
        self.pending.take()
    }

    /// Returns true when a move is waiting to be flushed.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(x: f64) -> PointerEvent {
        PointerEvent::Move { x, y: 0.0 }
    }

    #[test]
    fn moves_collapse_to_latest() {
        let mut c = MoveCoalescer::new();
        assert_eq!(c.push(mv(1.0)).count(), 0);
        assert_eq!(c.push(mv(2.0)).count(), 0);
        assert_eq!(c.push(mv(3.0)).count(), 0);
        assert_eq!(c.flush(), Some(mv(3.0)));
        assert_eq!(c.flush(), None);
    }

    #[test]
    fn barrier_releases_pending_move_first() {
        let mut c = MoveCoalescer::new();
        let _ = c.push(mv(5.0));
        let released: Vec<_> = c.push(PointerEvent::Up).collect();
        assert_eq!(released, vec![mv(5.0), PointerEvent::Up]);
        assert!(!c.has_pending());
    }

    #[test]
    fn barrier_without_pending_passes_through() {
        let mut c = MoveCoalescer::new();
        let released: Vec<_> = c.push(PointerEvent::Down { handle: 1 }).collect();
        assert_eq!(released, vec![PointerEvent::Down { handle: 1 }]);
    }

    #[test]
    fn secondary_contact_is_a_barrier() {
        let mut c = MoveCoalescer::new();
        let _ = c.push(mv(7.0));
        let released: Vec<_> = c.push(PointerEvent::SecondaryContact).collect();
        assert_eq!(released, vec![mv(7.0), PointerEvent::SecondaryContact]);
    }

    #[test]
    fn flush_after_barrier_is_empty() {
        let mut c = MoveCoalescer::new();
        let _ = c.push(mv(1.0));
        let _: Vec<_> = c.push(PointerEvent::Up).collect();
        assert_eq!(c.flush(), None);
    }

    #[test]
    fn interleaved_sequences_preserve_order() {
        let mut c = MoveCoalescer::new();
        let mut delivered = Vec::new();
        for event in [
            PointerEvent::Down { handle: 0 },
            mv(10.0),
            mv(20.0),
            PointerEvent::Up,
            PointerEvent::TrackPress { x: 30.0, y: 0.0 },
        ] {
            delivered.extend(c.push(event));
        }
        delivered.extend(c.flush());
        assert_eq!(
            delivered,
            vec![
                PointerEvent::Down { handle: 0 },
                mv(20.0),
                PointerEvent::Up,
                PointerEvent::TrackPress { x: 30.0, y: 0.0 },
            ]
        );
    }
}
