//! Timeline entries, flight records, and the append-only recorder.
//!
//! Entries carry typed enums internally; the flat string vocabulary the
//! export layer writes (`aircraft_depart`, `takeoff_abu_charge_done`, …) is
//! generated only at the serialization boundary by [`TimelineEntry::label`].

use abu_core::{AbuId, FlightId, PoolRole, SimTime};

use crate::SimObserver;

// ── Actor / tag vocabulary ────────────────────────────────────────────────────

/// Which timeline an entry belongs to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Aircraft,
    TakeoffAbu,
    CruiseAbu,
}

impl ActorKind {
    pub fn from_role(role: PoolRole) -> Self {
        match role {
            PoolRole::Takeoff => ActorKind::TakeoffAbu,
            PoolRole::Cruise => ActorKind::CruiseAbu,
        }
    }

    /// Export name.
    pub fn as_str(self) -> &'static str {
        match self {
            ActorKind::Aircraft => "aircraft",
            ActorKind::TakeoffAbu => "takeoff_abu",
            ActorKind::CruiseAbu => "cruise_abu",
        }
    }
}

/// What happened to the actor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventTag {
    /// Aircraft only.
    Depart,
    /// Aircraft only.
    Arrive,
    /// ABU granted to a flight and mounted.
    Attached,
    /// ABU shed in flight; its return leg begins.
    Detached,
    /// ABU back at its pad, plugged in.
    ReturnDone,
    /// ABU recharged and idle.
    ChargeDone,
}

impl EventTag {
    fn suffix(self) -> &'static str {
        match self {
            EventTag::Depart => "depart",
            EventTag::Arrive => "arrive",
            EventTag::Attached => "attached",
            EventTag::Detached => "detached",
            EventTag::ReturnDone => "return_done",
            EventTag::ChargeDone => "charge_done",
        }
    }
}

// ── TimelineEntry ─────────────────────────────────────────────────────────────

/// One tagged, timestamped observation of one actor.
///
/// Emission order is time-ordered per actor, but distinct actors can emit at
/// the same instant — sort the full log by time before external consumption
/// ([`TimelineRecorder::into_sorted`] does).
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEntry {
    pub actor: ActorKind,
    /// Unit index within its pool; `None` for the aircraft.
    pub unit: Option<AbuId>,
    /// The flight this event belongs to (a returning unit keeps the index of
    /// the flight that carried it out).
    pub flight: Option<FlightId>,
    pub time: SimTime,
    pub tag: EventTag,
}

impl TimelineEntry {
    /// The flat event label used in tabular export, e.g.
    /// `takeoff_abu_return_done`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.actor.as_str(), self.tag.suffix())
    }
}

// ── FlightRecord ──────────────────────────────────────────────────────────────

/// One realized flight cycle.  Created by the scheduler at touchdown;
/// insertion order in the day's log is chronological and authoritative.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightRecord {
    pub flight: FlightId,
    pub depart: SimTime,
    pub arrive: SimTime,
    /// Units flown, per pool role (empty for a role the mode doesn't fly).
    pub abus: [Vec<AbuId>; 2],
    /// Main-pack draw [kWh].
    pub e_main_kwh: f64,
    /// Total draw across `role`'s units [kWh], per pool role.
    pub e_abu_kwh: [f64; 2],
    /// Time this departure spent blocked on each pool [h], measured from
    /// the acquisition request to the grant.
    pub wait_hr: [f64; 2],
}

// ── TimelineRecorder ──────────────────────────────────────────────────────────

/// The default observer: appends every entry and flight record for later
/// aggregation or export.
#[derive(Default)]
pub struct TimelineRecorder {
    entries: Vec<TimelineEntry>,
    flights: Vec<FlightRecord>,
}

impl TimelineRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in emission order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Flight records in chronological order.
    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// Consume the recorder, returning entries stably sorted by simulated
    /// time (same-instant entries keep emission order) — the form external
    /// consumers require.
    pub fn into_sorted(mut self) -> Vec<TimelineEntry> {
        self.entries.sort_by_key(|e| e.time);
        self.entries
    }
}

impl SimObserver for TimelineRecorder {
    fn on_timeline(&mut self, entry: &TimelineEntry) {
        self.entries.push(*entry);
    }

    fn on_flight(&mut self, record: &FlightRecord) {
        self.flights.push(record.clone());
    }
}
