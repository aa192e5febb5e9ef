//! Flat, serializable row types — the shape both report files take.
//!
//! `Option` fields serialize as empty cells for roles the configuration
//! doesn't fly, matching the ragged columns of the study's original result
//! tables.

use abu_core::PoolRole;
use abu_sim::{ActorKind, SimParams, SweepOutcome, TimelineEntry};
use serde::Serialize;

use crate::DayMetrics;

// ── SweepRow ──────────────────────────────────────────────────────────────────

/// One sweep point's full numeric record.
#[derive(Clone, Debug, Serialize)]
pub struct SweepRow {
    // Sweep coordinates.
    pub e_abu_mission_kwh: f64,
    pub n_takeoff_abu_pool: Option<usize>,
    pub n_cruise_abu_pool: Option<usize>,

    // Main pack.
    pub e_pack_kwh_main: f64,
    pub e_mission_kwh_main: f64,
    pub dod_main: f64,
    pub soc_start_main: f64,
    pub soc_target: f64,
    pub soc_cc_end: f64,

    // Cycle timing.
    pub t_flight_hr: f64,
    pub t_charge_hr_main: f64,
    pub t_charge_hr_takeoff_abu: Option<f64>,
    pub t_charge_hr_cruise_abu: Option<f64>,
    pub t_return_takeoff_abu_hr: Option<f64>,
    pub t_return_cruise_abu_hr: Option<f64>,
    pub t_cycle_nominal_hr: f64,
    pub n_flights_nominal_no_abu_limit: usize,

    // 24-hour queuing outcome.
    pub n_flights_completed: usize,
    pub t_flight_day_hr: f64,
    pub t_slack_hr: f64,
    pub t_wait_takeoff_abu_day_hr: Option<f64>,
    pub t_wait_cruise_abu_day_hr: Option<f64>,
    pub abu_utilization_avg_takeoff: Option<f64>,
    pub abu_utilization_avg_cruise: Option<f64>,
    pub abu_bottleneck_takeoff_flag: Option<bool>,
    pub abu_bottleneck_cruise_flag: Option<bool>,

    // CC-CV reference fields.
    pub p_cc_kw_main: f64,
    pub p_cc_kw_takeoff_abu: Option<f64>,
    pub p_cc_kw_cruise_abu: Option<f64>,
    pub charger_limited_main: bool,
    pub charger_limited_takeoff_abu: Option<bool>,
    pub charger_limited_cruise_abu: Option<bool>,
}

impl SweepRow {
    /// Flatten one outcome plus its aggregates into a record.
    pub fn build(params: &SimParams, outcome: &SweepOutcome, metrics: &DayMetrics) -> Self {
        let day = &outcome.day;
        let dod_main = params.e_flight_main_kwh / params.main_pack.capacity_kwh;

        let active = |role: PoolRole| params.mode.requires(role);
        let pool_size =
            |role: PoolRole| active(role).then(|| params.role(role).pool_size);
        let t_charge =
            |role: PoolRole| day.abu_charge[role.index()].map(|ev| ev.t_total_hr);
        let t_return = |role: PoolRole| {
            active(role).then(|| params.role(role).kinematics.transit_time_hr())
        };
        let p_cc = |role: PoolRole| day.abu_charge[role.index()].map(|ev| ev.p_cc_kw);
        let limited =
            |role: PoolRole| day.abu_charge[role.index()].map(|ev| ev.charger_limited);

        let role_metric = |role: PoolRole| metrics.role(role);

        Self {
            e_abu_mission_kwh: outcome.e_abu_mission_kwh,
            n_takeoff_abu_pool: pool_size(PoolRole::Takeoff),
            n_cruise_abu_pool: pool_size(PoolRole::Cruise),

            e_pack_kwh_main: params.main_pack.capacity_kwh,
            e_mission_kwh_main: params.e_flight_main_kwh,
            dod_main,
            soc_start_main: params.soc_target - dod_main,
            soc_target: params.soc_target,
            soc_cc_end: params.soc_cc_to_cv,

            t_flight_hr: day.t_flight_hr,
            t_charge_hr_main: day.t_charge_hr_main,
            t_charge_hr_takeoff_abu: t_charge(PoolRole::Takeoff),
            t_charge_hr_cruise_abu: t_charge(PoolRole::Cruise),
            t_return_takeoff_abu_hr: t_return(PoolRole::Takeoff),
            t_return_cruise_abu_hr: t_return(PoolRole::Cruise),
            t_cycle_nominal_hr: day.t_cycle_nominal_hr,
            n_flights_nominal_no_abu_limit: day.n_flights_nominal_no_abu_limit,

            n_flights_completed: day.n_flights_completed,
            t_flight_day_hr: metrics.t_flight_day_hr,
            t_slack_hr: metrics.t_slack_hr,
            t_wait_takeoff_abu_day_hr: role_metric(PoolRole::Takeoff).map(|m| m.t_wait_day_hr),
            t_wait_cruise_abu_day_hr: role_metric(PoolRole::Cruise).map(|m| m.t_wait_day_hr),
            abu_utilization_avg_takeoff: role_metric(PoolRole::Takeoff)
                .map(|m| m.utilization_avg),
            abu_utilization_avg_cruise: role_metric(PoolRole::Cruise)
                .map(|m| m.utilization_avg),
            abu_bottleneck_takeoff_flag: role_metric(PoolRole::Takeoff).map(|m| m.bottleneck),
            abu_bottleneck_cruise_flag: role_metric(PoolRole::Cruise).map(|m| m.bottleneck),

            p_cc_kw_main: day.main_charge.p_cc_kw,
            p_cc_kw_takeoff_abu: p_cc(PoolRole::Takeoff),
            p_cc_kw_cruise_abu: p_cc(PoolRole::Cruise),
            charger_limited_main: day.main_charge.charger_limited,
            charger_limited_takeoff_abu: limited(PoolRole::Takeoff),
            charger_limited_cruise_abu: limited(PoolRole::Cruise),
        }
    }
}

// ── TimelineRow ───────────────────────────────────────────────────────────────

/// One flattened timeline entry.  Unit and flight indices are exported
/// 1-based (blank for the aircraft), as the downstream tooling expects.
#[derive(Clone, Debug, Serialize)]
pub struct TimelineRow {
    pub e_abu_mission_kwh: f64,
    pub timeline_type: &'static str,
    pub abu_index: Option<u32>,
    pub flight_index: Option<u32>,
    pub t_hr: f64,
    pub event: String,
}

impl TimelineRow {
    pub fn from_entry(e_abu_mission_kwh: f64, entry: &TimelineEntry) -> Self {
        Self {
            e_abu_mission_kwh,
            timeline_type: entry.actor.as_str(),
            abu_index: match entry.actor {
                ActorKind::Aircraft => None,
                _ => entry.unit.map(|u| u.0 + 1),
            },
            flight_index: entry.flight.map(|f| f.0 + 1),
            t_hr: entry.time.as_hours(),
            event: entry.label(),
        }
    }
}
