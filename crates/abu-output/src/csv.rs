//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `sweep_results.csv` — one row per feasible sweep point
//! - `sweep_timeline.csv` — one row per timeline entry
//!
//! Headers come from the row structs' field names via serde, so the files
//! stay in lockstep with [`SweepRow`]/[`TimelineRow`] by construction.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{OutputResult, SweepRow, TimelineRow};

/// Writes the two report tables as CSV files.
pub struct CsvReportWriter {
    results: Writer<File>,
    timeline: Writer<File>,
    finished: bool,
}

impl CsvReportWriter {
    /// Open (or create) the two CSV files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let results = Writer::from_path(dir.join("sweep_results.csv"))?;
        let timeline = Writer::from_path(dir.join("sweep_timeline.csv"))?;
        Ok(Self {
            results,
            timeline,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_sweep_row(&mut self, row: &SweepRow) -> OutputResult<()> {
        self.results.serialize(row)?;
        Ok(())
    }

    fn write_timeline_row(&mut self, row: &TimelineRow) -> OutputResult<()> {
        self.timeline.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.results.flush()?;
        self.timeline.flush()?;
        Ok(())
    }
}
