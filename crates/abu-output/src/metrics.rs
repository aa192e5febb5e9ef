//! `DayMetrics` — aggregate one day's flight log and timeline into the
//! utilization / wait / bottleneck summary the sweep reports carry.

use abu_core::PoolRole;
use abu_sim::{ActorKind, DayResult, EventTag, SimParams, TimelineEntry};

// ── RoleMetrics ───────────────────────────────────────────────────────────────

/// Aggregates for one pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleMetrics {
    pub pool_size: usize,
    /// Total time the aircraft spent blocked on this pool [h].
    pub t_wait_day_hr: f64,
    /// Mean wait per completed flight [h].
    pub avg_wait_hr: f64,
    /// Mean fraction of the day each unit spent off-idle
    /// (attached + returning + charging).
    pub utilization_avg: f64,
    /// `true` when the average wait exceeds the configured fraction of one
    /// ground-ops cycle — the pool, not the main-pack recharge, is the
    /// binding constraint on cadence.
    pub bottleneck: bool,
}

// ── DayMetrics ────────────────────────────────────────────────────────────────

/// Whole-day summary, computed after the run from the flight records and the
/// time-sorted timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayMetrics {
    /// Total airborne time [h].
    pub t_flight_day_hr: f64,
    /// Ground time: horizon minus airborne time [h].
    pub t_slack_hr: f64,
    /// Per-role aggregates; `None` for a role the mode doesn't fly.
    pub roles: [Option<RoleMetrics>; 2],
}

impl DayMetrics {
    /// Aggregate `day` and its `timeline` under `params`.
    ///
    /// With zero completed flights there are no wait observations, so the
    /// bottleneck flag stays `false` — the day is reported as
    /// `n_flights_completed = 0`, not as a pool diagnosis.
    pub fn compute(params: &SimParams, day: &DayResult, timeline: &[TimelineEntry]) -> Self {
        let horizon_hr = day.horizon.as_hours();
        let t_flight_day_hr = day.t_flight_day_hr;

        let mut roles = [None, None];
        for role in params.active_roles() {
            let i = role.index();
            let pool_size = params.role(role).pool_size;

            let t_wait_day_hr: f64 = day.flights.iter().map(|f| f.wait_hr[i]).sum();
            let avg_wait_hr = if day.flights.is_empty() {
                0.0
            } else {
                t_wait_day_hr / day.flights.len() as f64
            };

            let busy_hr = busy_hours(timeline, role, pool_size, horizon_hr);
            let utilization_avg = busy_hr / (horizon_hr * pool_size as f64);

            let bottleneck =
                avg_wait_hr > params.bottleneck_wait_frac * params.t_ground_ops_hr;

            roles[i] = Some(RoleMetrics {
                pool_size,
                t_wait_day_hr,
                avg_wait_hr,
                utilization_avg,
                bottleneck,
            });
        }

        Self {
            t_flight_day_hr,
            t_slack_hr: horizon_hr - t_flight_day_hr,
            roles,
        }
    }

    /// The aggregates for `role`, if that role flew.
    pub fn role(&self, role: PoolRole) -> Option<&RoleMetrics> {
        self.roles[role.index()].as_ref()
    }
}

/// Sum of off-idle time across `role`'s units [h].
///
/// A unit is busy from each `attached` entry to the matching `charge_done`;
/// the detach and return entries fall inside that span.  An interval still
/// open when the log ends (unit mid-cycle at the horizon) is truncated at
/// the horizon.
fn busy_hours(
    timeline: &[TimelineEntry],
    role: PoolRole,
    pool_size: usize,
    horizon_hr: f64,
) -> f64 {
    let actor = ActorKind::from_role(role);
    let mut open: Vec<Option<f64>> = vec![None; pool_size];
    let mut busy_hr = 0.0;

    for entry in timeline {
        if entry.actor != actor {
            continue;
        }
        let Some(unit) = entry.unit else {
            continue;
        };
        let Some(slot) = open.get_mut(unit.index()) else {
            continue;
        };
        match entry.tag {
            EventTag::Attached => {
                if slot.is_none() {
                    *slot = Some(entry.time.as_hours());
                }
            }
            EventTag::ChargeDone => {
                if let Some(start) = slot.take() {
                    busy_hr += entry.time.as_hours() - start;
                }
            }
            _ => {}
        }
    }

    for start in open.into_iter().flatten() {
        busy_hr += horizon_hr - start;
    }
    busy_hr
}
