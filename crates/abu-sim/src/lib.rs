//! `abu-sim` — the event-driven operating-day scheduler.
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`params`]   | `SimParams`, `AssistMode` — the validated config       |
//! | [`event`]    | `Event`, `EventQueue` (sorted pending-event set)       |
//! | [`sim`]      | `EventScheduler`, `DayResult`                          |
//! | [`timeline`] | `TimelineEntry`, `FlightRecord`, `TimelineRecorder`    |
//! | [`observer`] | `SimObserver` trait, `NoopObserver`                    |
//! | [`sweep`]    | `run_sweep`, `SweepOutcome`                            |
//! | [`error`]    | `SimError`, `SimResult`                                |
//!
//! # Turnaround algorithm
//!
//! For every cycle: ground ops (fixed duration) → request the configured
//! ABU(s) → depart once the main pack is recharged *and* every pool has
//! granted → fly, detach per role, land → released units fly home and
//! recharge while the aircraft turns around.  The main-pack recharge
//! overlaps the ABU wait; the aircraft never departs before its own pack is
//! ready.  The day ends at the horizon or when no further flight could
//! complete inside it — partial flights are never recorded.

pub mod error;
pub mod event;
pub mod observer;
pub mod params;
pub mod sim;
pub mod sweep;
pub mod timeline;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use event::{Event, EventQueue};
pub use observer::{NoopObserver, SimObserver};
pub use params::{AbuRoleParams, AssistMode, PackSpec, SimParams};
pub use sim::{DayResult, EventScheduler};
pub use sweep::{run_sweep, SweepOutcome};
pub use timeline::{ActorKind, EventTag, FlightRecord, TimelineEntry, TimelineRecorder};
