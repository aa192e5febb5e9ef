//! daily-cadence — end-to-end demo for the abu-sim fleet-cadence simulator.
//!
//! Runs the combined operating mode (takeoff-assist + extended-cruise) with
//! a lightly loaded main pack, sweeps the cruise pool's per-unit mission
//! energy at pool sizes 1 and 2, writes the two report CSVs, and prints a
//! cadence summary.  With one cruise unit the heavier sweep points trip the
//! bottleneck flag; a second unit clears it.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use abu_core::PoolRole;
use abu_output::{export_outcomes, CsvReportWriter};
use abu_sim::{run_sweep, AssistMode, SimParams};

// ── Constants ─────────────────────────────────────────────────────────────────

const SWEPT_ROLE: PoolRole = PoolRole::Cruise;
const POOL_SIZES: [usize; 2] = [1, 2];
// Main-pack draw per flight with both ABU roles carrying their share [kWh].
const E_FLIGHT_MAIN_KWH: f64 = 10.0;
// 5..=40 kWh in 5 kWh steps; the top point overruns the 50 kWh ABU pack
// once the 12 kWh ops reserve is added and is skipped as infeasible.
const E_MISSION_KWH: [f64; 8] = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== daily-cadence — ABU fleet-cadence feasibility ===");
    println!(
        "Sweep: {} energy points × pool sizes {POOL_SIZES:?} ({SWEPT_ROLE} pool)",
        E_MISSION_KWH.len()
    );
    println!();

    let t0 = Instant::now();
    for pool_size in POOL_SIZES {
        let mut params = SimParams::default();
        params.mode = AssistMode::Combined;
        params.e_flight_main_kwh = E_FLIGHT_MAIN_KWH;
        params.cruise.pool_size = pool_size;
        params.cruise.units_per_flight = 1;

        // 1. Run the sweep (infeasible points drop out here).
        let outcomes = run_sweep(&params, SWEPT_ROLE, &E_MISSION_KWH)?;

        // 2. Export both report tables.
        let out_dir = format!("output/daily-cadence/pool-{pool_size}");
        std::fs::create_dir_all(&out_dir)?;
        let mut writer = CsvReportWriter::new(Path::new(&out_dir))?;
        let metrics = export_outcomes(&params, &outcomes, &mut writer)?;

        // 3. Cadence summary.
        println!(
            "Pool size {pool_size}: {} feasible / {} swept points  →  {out_dir}/",
            outcomes.len(),
            E_MISSION_KWH.len()
        );
        println!(
            "{:>12} {:>9} {:>9} {:>11} {:>11} {:>11}",
            "E_abu [kWh]", "flights", "nominal", "wait [h]", "util", "bottleneck"
        );
        println!("{}", "-".repeat(68));
        for (outcome, metric) in outcomes.iter().zip(&metrics) {
            let swept = metric
                .role(SWEPT_ROLE)
                .copied()
                .unwrap_or_else(zero_metrics);
            println!(
                "{:>12.1} {:>9} {:>9} {:>11.3} {:>11.3} {:>11}",
                outcome.e_abu_mission_kwh,
                outcome.day.n_flights_completed,
                outcome.day.n_flights_nominal_no_abu_limit,
                swept.t_wait_day_hr,
                swept.utilization_avg,
                if swept.bottleneck { "YES" } else { "no" },
            );
        }
        println!();
    }

    println!("Done in {:.3} s", t0.elapsed().as_secs_f64());
    Ok(())
}

fn zero_metrics() -> abu_output::RoleMetrics {
    abu_output::RoleMetrics {
        pool_size: 0,
        t_wait_day_hr: 0.0,
        avg_wait_hr: 0.0,
        utilization_avg: 0.0,
        bottleneck: false,
    }
}
