//! The `ReportWriter` trait and the outcome-export driver.

use abu_sim::{SimParams, SweepOutcome};

use crate::{DayMetrics, OutputResult, SweepRow, TimelineRow};

/// Backend seam for the two report tables.
///
/// Only a CSV implementation ships today, but the scheduler-facing code
/// writes against this trait so a database or columnar backend drops in
/// without touching the export driver.
pub trait ReportWriter {
    /// Write one sweep-point record.
    fn write_sweep_row(&mut self, row: &SweepRow) -> OutputResult<()>;

    /// Write one flattened timeline entry.
    fn write_timeline_row(&mut self, row: &TimelineRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Aggregate each outcome, write its result row and timeline rows, and
/// return the per-point metrics (in outcome order) for the caller's own
/// reporting.
pub fn export_outcomes<W: ReportWriter>(
    params: &SimParams,
    outcomes: &[SweepOutcome],
    writer: &mut W,
) -> OutputResult<Vec<DayMetrics>> {
    let mut all_metrics = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let metrics = DayMetrics::compute(params, &outcome.day, &outcome.timeline);
        writer.write_sweep_row(&SweepRow::build(params, outcome, &metrics))?;
        for entry in &outcome.timeline {
            writer.write_timeline_row(&TimelineRow::from_entry(
                outcome.e_abu_mission_kwh,
                entry,
            ))?;
        }
        all_metrics.push(metrics);
    }
    writer.finish()?;
    Ok(all_metrics)
}
