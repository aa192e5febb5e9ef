//! `abu-output` — day metrics and tabular export for the abu-sim simulator.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`metrics`] | `DayMetrics`, `RoleMetrics` — the aggregation layer   |
//! | [`row`]     | `SweepRow`, `TimelineRow` — flat serializable records |
//! | [`writer`]  | `ReportWriter` trait + `export_outcomes` driver       |
//! | [`csv`]     | CSV backend (`sweep_results.csv`, `sweep_timeline.csv`) |
//! | [`error`]   | `OutputError`, `OutputResult`                         |
//!
//! Internal state enums become flat strings only here; upstream crates never
//! pass tags around as control-flow values.

pub mod csv;
pub mod error;
pub mod metrics;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use metrics::{DayMetrics, RoleMetrics};
pub use row::{SweepRow, TimelineRow};
pub use writer::{export_outcomes, ReportWriter};
