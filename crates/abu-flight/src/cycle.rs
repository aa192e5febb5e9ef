//! Flight-cycle timing and energy bookkeeping.

use abu_core::PoolRole;

use crate::MissionProfile;

// ── AbuKinematics ─────────────────────────────────────────────────────────────

/// Return-flight kinematics for one pool's ABUs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbuKinematics {
    /// Horizontal return-cruise speed [m/s].
    pub horizontal_speed_m_p_s: f64,
    /// Vertical descent speed [m/s].
    pub vertical_speed_m_p_s: f64,
    /// Altitude at detach [m].
    pub detach_altitude_m: f64,
}

impl AbuKinematics {
    /// Time for a detached unit to reach its ground node [h].
    pub fn transit_time_hr(&self) -> f64 {
        abu_transit_time(
            self.horizontal_speed_m_p_s,
            self.vertical_speed_m_p_s,
            self.detach_altitude_m,
        )
    }
}

/// Time [h] for a detached ABU to fly back to its ground node.
///
/// Decomposed into a horizontal-cruise leg and a vertical-descent leg and
/// simply summed; the lateral offset at detach is taken equal to the detach
/// altitude (the unit detaches within a 45° cone above its pad).  No coupled
/// glide-path geometry is modeled — the independent-leg sum is the
/// conservative estimate the feasibility study calls for.
pub fn abu_transit_time(
    horizontal_speed_m_p_s: f64,
    vertical_speed_m_p_s: f64,
    detach_altitude_m: f64,
) -> f64 {
    let t_horizontal_s = detach_altitude_m / horizontal_speed_m_p_s;
    let t_vertical_s = detach_altitude_m / vertical_speed_m_p_s;
    (t_horizontal_s + t_vertical_s) / 3_600.0
}

// ── AbuDraw ───────────────────────────────────────────────────────────────────

/// Energy drawn from one attached ABU over a flight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbuDraw {
    /// Energy offloaded from the main pack while attached [kWh].
    pub e_mission_kwh: f64,
    /// Operations reserve consumed by the unit's own return flight [kWh].
    pub e_ops_kwh: f64,
}

impl AbuDraw {
    /// Total energy gone from the unit's pack when it lands back at its pad.
    #[inline]
    pub fn total_kwh(&self) -> f64 {
        self.e_mission_kwh + self.e_ops_kwh
    }
}

// ── FlightCycleModel ──────────────────────────────────────────────────────────

/// Timing and per-pack energy draw for one repeatable flight cycle.
///
/// Built once per sweep point from the segment times and energies the
/// upstream sizing produced; read many times by the scheduler.  Ground
/// turnaround time is deliberately *not* here — it is a configuration
/// constant of the operation, not a property of the flight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightCycleModel {
    /// Per-segment flight times.
    pub profile: MissionProfile,
    /// Main-pack draw per flight, net of any ABU offload [kWh].
    pub e_main_kwh: f64,
    /// Per-role ABU draw; `None` when the role flies no units.
    abu_draw: [Option<AbuDraw>; 2],
}

impl FlightCycleModel {
    pub fn new(profile: MissionProfile, e_main_kwh: f64) -> Self {
        Self {
            profile,
            e_main_kwh,
            abu_draw: [None, None],
        }
    }

    /// Attach a per-role ABU draw (builder-style).
    pub fn with_abu_draw(mut self, role: PoolRole, draw: AbuDraw) -> Self {
        self.abu_draw[role.index()] = Some(draw);
        self
    }

    /// Block time of one flight [h].
    #[inline]
    pub fn flight_duration_hr(&self) -> f64 {
        self.profile.flight_duration_hr()
    }

    /// The draw taken from each of `role`'s units, if that role flies.
    #[inline]
    pub fn abu_draw(&self, role: PoolRole) -> Option<AbuDraw> {
        self.abu_draw[role.index()]
    }

    /// SOC a unit of `role` holds when it lands back at its pad, starting a
    /// mission at `soc_start` with a pack of `pack_capacity_kwh`.
    ///
    /// Returns `None` for a role that flies no units, or when the draw
    /// exceeds the pack (an infeasible point the sweep layer screens out).
    pub fn post_mission_soc(
        &self,
        role: PoolRole,
        soc_start: f64,
        pack_capacity_kwh: f64,
    ) -> Option<f64> {
        let draw = self.abu_draw(role)?;
        let soc = soc_start - draw.total_kwh() / pack_capacity_kwh;
        (soc >= 0.0).then_some(soc)
    }
}
