//! One pool member and its lifecycle state.

use abu_charge::BatteryPack;
use abu_core::{AbuId, FlightId, SimTime};

// ── AbuState ──────────────────────────────────────────────────────────────────

/// Lifecycle state of one ABU unit.
///
/// The variants are the four corners of the unit cycle; the scheduler is the
/// only writer and drives each unit strictly around the loop.  String tags
/// for these states exist only at the export boundary (`abu-output`) — the
/// enum itself is what control flow matches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbuState {
    /// Fully charged and parked at its pad, ready to be acquired.
    IdleCharged,
    /// Riding a flight, tagged with that flight's index.
    Attached { flight: FlightId },
    /// Detached and flying itself back to its pad.
    Returning,
    /// Plugged in at its pad.
    Charging,
}

impl AbuState {
    /// Short state name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            AbuState::IdleCharged => "idle-charged",
            AbuState::Attached { .. } => "attached",
            AbuState::Returning => "returning",
            AbuState::Charging => "charging",
        }
    }
}

// ── AbuUnit ───────────────────────────────────────────────────────────────────

/// One pool member: identity, lifecycle state, electrical state, and the
/// instant it next becomes available.
///
/// `ready_at` is only meaningful while `Returning` (pad arrival) or
/// `Charging` (charge completion); in the idle state the unit is available
/// immediately and while attached its availability is governed by the
/// flight, not the unit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbuUnit {
    pub id: AbuId,
    pub state: AbuState,
    pub ready_at: SimTime,
    pub pack: BatteryPack,
}

impl AbuUnit {
    pub(crate) fn new(id: AbuId, pack: BatteryPack) -> Self {
        Self {
            id,
            state: AbuState::IdleCharged,
            ready_at: SimTime::ZERO,
            pack,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, AbuState::IdleCharged)
    }
}
