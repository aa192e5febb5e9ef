//! `Event` and the sorted pending-event queue.
//!
//! # Why this shape
//!
//! The day is driven event-by-event, not with a fixed timestep: most of a
//! 24-hour horizon is "nothing changes", so the scheduler jumps the clock
//! straight to the next instant at which any actor's state can change.  A
//! `BTreeMap<SimTime, Vec<Event>>` gives O(log W) insert and first-key pop
//! where W = number of distinct pending instants, which stays in the single
//! digits for one aircraft and a handful of units.
//!
//! # Same-instant ordering
//!
//! Several events can land on the same millisecond (e.g. two units finishing
//! their recharge together).  The queue drains a whole instant at once and
//! hands the batch back sorted by a fixed total order — completions first,
//! then detaches, then aircraft events, ascending unit index within a kind —
//! so a rerun of the same configuration replays the exact same sequence.
//! Ascending unit index is also what makes freed units reach the pool in
//! index order, the documented tie-break.

use std::collections::BTreeMap;

use abu_core::{AbuId, FlightId, PoolRole, SimTime};

// ── Event ─────────────────────────────────────────────────────────────────────

/// One scheduled state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A unit finished recharging: `Charging → IdleCharged`, then the pool
    /// services its wait queue.
    ChargeComplete {
        role: PoolRole,
        unit: AbuId,
        flight: FlightId,
    },

    /// A detached unit reached its pad: `Returning → Charging`.
    ReturnComplete {
        role: PoolRole,
        unit: AbuId,
        flight: FlightId,
    },

    /// The active flight sheds `role`'s units.
    Detach { role: PoolRole },

    /// The active flight touches down; the next turnaround begins.
    Arrive,

    /// Ground ops are done — request the next flight's units.
    AttachAttempt,

    /// The main pack finished recharging; the aircraft may depart as soon as
    /// its units are granted.
    PackReady,
}

impl Event {
    /// Fixed application order within one instant.
    fn sort_key(&self) -> (u8, u8, u32) {
        match *self {
            Event::ChargeComplete { role, unit, .. } => (0, role.index() as u8, unit.0),
            Event::ReturnComplete { role, unit, .. } => (1, role.index() as u8, unit.0),
            Event::Detach { role } => (2, role.index() as u8, 0),
            Event::Arrive => (3, 0, 0),
            Event::AttachAttempt => (4, 0, 0),
            Event::PackReady => (5, 0, 0),
        }
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Pending events keyed by simulated time.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, Vec<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time`.
    pub fn push(&mut self, time: SimTime, event: Event) {
        self.inner.entry(time).or_default().push(event);
        self.total += 1;
    }

    /// Remove and return the earliest instant's batch, sorted into the fixed
    /// application order.  `None` when no events remain.
    pub fn pop_next(&mut self) -> Option<(SimTime, Vec<Event>)> {
        let (&time, _) = self.inner.first_key_value()?;
        let mut events = self.inner.remove(&time)?;
        self.total -= events.len();
        events.sort_by_key(Event::sort_key);
        Some((time, events))
    }

    /// The earliest instant with a pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop everything (between independent runs).
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
