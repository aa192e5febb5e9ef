//! Simulation observer trait for timeline collection and progress reporting.

use abu_core::SimTime;

use crate::{FlightRecord, TimelineEntry};

/// Callbacks invoked by [`EventScheduler::run`][crate::EventScheduler::run]
/// as the day unfolds.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — departure printer
///
/// ```rust,ignore
/// struct DeparturePrinter;
///
/// impl SimObserver for DeparturePrinter {
///     fn on_flight(&mut self, record: &FlightRecord) {
///         println!("flight {} blocked {:.2} h on the takeoff pool",
///             record.flight, record.wait_hr[0]);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per applied timeline event, in application order.
    fn on_timeline(&mut self, _entry: &TimelineEntry) {}

    /// Called at touchdown with the completed flight's record.  Flights that
    /// cannot finish inside the horizon are never reported.
    fn on_flight(&mut self, _record: &FlightRecord) {}

    /// Called once when the day ends (horizon exhausted or no further flight
    /// can complete).
    fn on_day_end(&mut self, _horizon: SimTime, _flights_completed: usize) {}
}

/// A [`SimObserver`] that does nothing.  Use when only the returned
/// [`DayResult`][crate::DayResult] matters.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
