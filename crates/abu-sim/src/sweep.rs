//! Sweep runner: evaluate one base configuration across a list of per-ABU
//! mission-energy points.
//!
//! Sweeps deliberately explore both feasible and infeasible regions, so an
//! infeasible point is *skipped* — it contributes no outcome — rather than
//! failing the whole sweep.  Everything else (a malformed base
//! configuration, a model contract violation mid-run) still propagates.

use abu_core::PoolRole;

use crate::{DayResult, EventScheduler, SimParams, SimResult, TimelineEntry, TimelineRecorder};

/// One feasible sweep point's full output: the day summary, the chronological
/// timeline, and the point that produced them.
#[derive(Clone, Debug)]
pub struct SweepOutcome {
    /// The swept role's per-unit mission energy at this point [kWh].
    pub e_abu_mission_kwh: f64,
    /// Which role was swept.
    pub swept_role: PoolRole,
    pub day: DayResult,
    /// Timeline entries sorted by simulated time.
    pub timeline: Vec<TimelineEntry>,
}

/// Run `base` once per entry in `energies`, varying `role`'s per-unit
/// mission energy.
///
/// Returns one [`SweepOutcome`] per *feasible* point, in input order; the
/// output can therefore be shorter than `energies`.
pub fn run_sweep(
    base: &SimParams,
    role: PoolRole,
    energies: &[f64],
) -> SimResult<Vec<SweepOutcome>> {
    base.validate()?;

    let mut outcomes = Vec::with_capacity(energies.len());
    for &e_abu_mission_kwh in energies {
        let mut params = base.clone();
        params.role_mut(role).e_mission_kwh_per_abu = e_abu_mission_kwh;
        if params.check_feasible().is_err() {
            continue;
        }

        let mut scheduler = EventScheduler::new(params)?;
        let mut recorder = TimelineRecorder::new();
        let day = scheduler.run(&mut recorder)?;
        outcomes.push(SweepOutcome {
            e_abu_mission_kwh,
            swept_role: role,
            day,
            timeline: recorder.into_sorted(),
        });
    }
    Ok(outcomes)
}
