//! Integration tests for abu-output.

use abu_charge::Charger;
use abu_core::PoolRole;
use abu_flight::{AbuKinematics, MissionProfile, SegmentKind};
use abu_sim::{
    AbuRoleParams, AssistMode, EventScheduler, PackSpec, SimParams, TimelineRecorder, run_sweep,
};

use crate::writer::ReportWriter;
use crate::{DayMetrics, OutputResult, SweepRow, TimelineRow, export_outcomes};

// ── Fixtures (mirror the abu-sim test day) ────────────────────────────────────

fn params(e_mission_kwh: f64, pool_size: usize) -> SimParams {
    SimParams {
        horizon_hr: 24.0,
        t_ground_ops_hr: 0.25,
        mode: AssistMode::AssistedTakeoff,
        charger: Charger {
            ac_power_kw: 100.0,
            ac_to_dc_efficiency: 1.0,
            i_term_c: 0.05,
        },
        max_c_rate: 20.0,
        soc_target: 1.0,
        soc_cc_to_cv: 1.0,
        main_pack: PackSpec {
            nominal_voltage_v: 1_000.0,
            capacity_kwh: 100.0,
        },
        abu_pack: PackSpec {
            nominal_voltage_v: 500.0,
            capacity_kwh: 100.0,
        },
        e_flight_main_kwh: 10.0,
        profile: MissionProfile::from_segments([
            (SegmentKind::HoverClimb, 360.0),
            (SegmentKind::Cruise, 1_080.0),
            (SegmentKind::HoverDescend, 360.0),
        ]),
        takeoff: AbuRoleParams {
            pool_size,
            units_per_flight: 1,
            e_mission_kwh_per_abu: e_mission_kwh,
            e_ops_kwh_per_abu: 20.0,
            kinematics: AbuKinematics {
                horizontal_speed_m_p_s: 30.0,
                vertical_speed_m_p_s: 5.0,
                detach_altitude_m: 360.0,
            },
            detach_through: SegmentKind::HoverClimb,
        },
        cruise: AbuRoleParams {
            pool_size: 1,
            units_per_flight: 1,
            e_mission_kwh_per_abu: 10.0,
            e_ops_kwh_per_abu: 20.0,
            kinematics: AbuKinematics {
                horizontal_speed_m_p_s: 30.0,
                vertical_speed_m_p_s: 5.0,
                detach_altitude_m: 360.0,
            },
            detach_through: SegmentKind::Cruise,
        },
        bottleneck_wait_frac: 0.5,
    }
}

fn run_day(p: &SimParams) -> (abu_sim::DayResult, Vec<abu_sim::TimelineEntry>) {
    let mut sched = EventScheduler::new(p.clone()).unwrap();
    let mut rec = TimelineRecorder::new();
    let day = sched.run(&mut rec).unwrap();
    (day, rec.into_sorted())
}

/// Trait-level test double: collects rows instead of writing files.
#[derive(Default)]
struct MemWriter {
    sweep: Vec<SweepRow>,
    timeline: Vec<TimelineRow>,
    finishes: usize,
}

impl ReportWriter for MemWriter {
    fn write_sweep_row(&mut self, row: &SweepRow) -> OutputResult<()> {
        self.sweep.push(row.clone());
        Ok(())
    }

    fn write_timeline_row(&mut self, row: &TimelineRow) -> OutputResult<()> {
        self.timeline.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finishes += 1;
        Ok(())
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use super::*;

    #[test]
    fn uncontested_pool_shows_no_bottleneck() {
        let p = params(10.0, 1);
        let (day, timeline) = run_day(&p);
        let m = DayMetrics::compute(&p, &day, &timeline);

        let takeoff = m.role(PoolRole::Takeoff).unwrap();
        assert_eq!(takeoff.t_wait_day_hr, 0.0);
        assert!(!takeoff.bottleneck);
        // 32 sorties × 0.4233 h busy each over a 24 h day.
        assert!((takeoff.utilization_avg - 0.564444).abs() < 1e-3);
        assert!((m.t_flight_day_hr - 16.0).abs() < 1e-9);
        assert!((m.t_slack_hr - 8.0).abs() < 1e-9);
        // Role the mode doesn't fly has no aggregate.
        assert!(m.role(PoolRole::Cruise).is_none());
    }

    #[test]
    fn starved_pool_flags_the_bottleneck() {
        let p = params(60.0, 1);
        let (day, timeline) = run_day(&p);
        let m = DayMetrics::compute(&p, &day, &timeline);

        let takeoff = m.role(PoolRole::Takeoff).unwrap();
        assert!(takeoff.bottleneck);
        assert!((takeoff.avg_wait_hr - 0.166667).abs() < 1e-3);
        // The single unit is in motion essentially all day.
        assert!(takeoff.utilization_avg > 0.9);
        assert!(takeoff.utilization_avg <= 1.0);
    }

    #[test]
    fn adequate_pool_size_clears_the_flag() {
        let p = params(60.0, 2);
        let (day, timeline) = run_day(&p);
        let m = DayMetrics::compute(&p, &day, &timeline);

        let takeoff = m.role(PoolRole::Takeoff).unwrap();
        assert_eq!(takeoff.t_wait_day_hr, 0.0);
        assert!(!takeoff.bottleneck);
    }

    #[test]
    fn empty_day_yields_zeroed_metrics() {
        let mut p = params(10.0, 1);
        p.horizon_hr = 0.5;
        let (day, timeline) = run_day(&p);
        let m = DayMetrics::compute(&p, &day, &timeline);

        assert_eq!(day.n_flights_completed, 0);
        assert_eq!(m.t_flight_day_hr, 0.0);
        assert!((m.t_slack_hr - 0.5).abs() < 1e-12);
        let takeoff = m.role(PoolRole::Takeoff).unwrap();
        assert_eq!(takeoff.t_wait_day_hr, 0.0);
        assert!(!takeoff.bottleneck);
        assert_eq!(takeoff.utilization_avg, 0.0);
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;

    #[test]
    fn sweep_row_carries_pack_and_charge_reference_fields() {
        let p = params(10.0, 1);
        let outcomes = run_sweep(&p, PoolRole::Takeoff, &[10.0]).unwrap();
        let m = DayMetrics::compute(&p, &outcomes[0].day, &outcomes[0].timeline);
        let row = SweepRow::build(&p, &outcomes[0], &m);

        assert_eq!(row.e_abu_mission_kwh, 10.0);
        assert_eq!(row.n_takeoff_abu_pool, Some(1));
        assert_eq!(row.n_cruise_abu_pool, None);
        assert!((row.dod_main - 0.1).abs() < 1e-12);
        assert!((row.soc_start_main - 0.9).abs() < 1e-12);
        // 100 kW charger into a 20 C, 100 kWh pack: charger-bound.
        assert!(row.charger_limited_main);
        assert!((row.p_cc_kw_main - 100.0).abs() < 1e-9);
        assert_eq!(row.charger_limited_takeoff_abu, Some(true));
        assert_eq!(row.t_charge_hr_cruise_abu, None);
        assert!((row.t_charge_hr_takeoff_abu.unwrap() - 0.3).abs() < 1e-9);
        assert_eq!(row.n_flights_completed, 32);
    }

    #[test]
    fn timeline_rows_are_one_based_and_labeled() {
        let p = params(10.0, 1);
        let (_, timeline) = run_day(&p);

        let first_abu = timeline
            .iter()
            .find(|e| e.unit.is_some())
            .map(|e| TimelineRow::from_entry(10.0, e))
            .unwrap();
        assert_eq!(first_abu.timeline_type, "takeoff_abu");
        assert_eq!(first_abu.abu_index, Some(1));
        assert_eq!(first_abu.flight_index, Some(1));
        assert_eq!(first_abu.event, "takeoff_abu_attached");

        let first_depart = timeline
            .iter()
            .find(|e| e.unit.is_none())
            .map(|e| TimelineRow::from_entry(10.0, e))
            .unwrap();
        assert_eq!(first_depart.timeline_type, "aircraft");
        assert_eq!(first_depart.abu_index, None);
        assert_eq!(first_depart.event, "aircraft_depart");
        assert!((first_depart.t_hr - 0.25).abs() < 1e-9);
    }
}

// ── Export driver & CSV backend ───────────────────────────────────────────────

#[cfg(test)]
mod export {
    use super::*;
    use crate::CsvReportWriter;

    #[test]
    fn export_writes_one_result_row_per_feasible_point() {
        let p = params(10.0, 1);
        // 90 kWh point is infeasible and vanishes before export.
        let outcomes = run_sweep(&p, PoolRole::Takeoff, &[10.0, 90.0, 60.0]).unwrap();
        let mut w = MemWriter::default();
        let metrics = export_outcomes(&p, &outcomes, &mut w).unwrap();

        assert_eq!(w.sweep.len(), 2);
        assert_eq!(metrics.len(), 2);
        assert_eq!(w.finishes, 1);
        assert_eq!(
            w.timeline.len(),
            outcomes.iter().map(|o| o.timeline.len()).sum::<usize>()
        );
        // The starved point is flagged, the light one is not.
        assert_eq!(w.sweep[0].abu_bottleneck_takeoff_flag, Some(false));
        assert_eq!(w.sweep[1].abu_bottleneck_takeoff_flag, Some(true));
    }

    #[test]
    fn csv_backend_writes_both_files_with_headers() {
        let p = params(10.0, 1);
        let outcomes = run_sweep(&p, PoolRole::Takeoff, &[10.0]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        export_outcomes(&p, &outcomes, &mut w).unwrap();

        let results = std::fs::read_to_string(dir.path().join("sweep_results.csv")).unwrap();
        let mut lines = results.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("n_flights_completed"));
        assert!(header.contains("abu_bottleneck_takeoff_flag"));
        assert_eq!(lines.count(), 1);

        let timeline = std::fs::read_to_string(dir.path().join("sweep_timeline.csv")).unwrap();
        let mut lines = timeline.lines();
        assert!(lines.next().unwrap().contains("timeline_type"));
        assert_eq!(lines.count(), outcomes[0].timeline.len());
        assert!(timeline.contains("aircraft_depart"));
        assert!(timeline.contains("takeoff_abu_charge_done"));
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
