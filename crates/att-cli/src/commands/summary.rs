//! Summary command for headline attendance counts.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use att_core::{ReportQuery, Snapshot, Summary, mid_shift_headcount, reconcile, summarize};
use chrono::NaiveDate;
use serde::Serialize;

/// Counts for one reconciled range.
#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(flatten)]
    pub summary: Summary,
    pub total_rows: usize,
    /// Distinct persons with an open (PENDING_EXIT) day.
    pub mid_shift: usize,
    pub orphan_events: usize,
}

/// Runs the engine and aggregates the full row set.
pub fn generate_summary_data(snapshot: &Snapshot, query: &ReportQuery) -> Result<SummaryData> {
    let result = reconcile(snapshot, query)?;
    let summary = summarize(&result.records);

    Ok(SummaryData {
        start: query.start,
        end: query.end,
        summary,
        total_rows: summary.total_rows(),
        mid_shift: mid_shift_headcount(&result.records),
        orphan_events: result.orphan_events,
    })
}

/// Formats the human-readable summary.
pub fn format_summary(data: &SummaryData) -> String {
    let mut output = String::new();
    let s = &data.summary;

    writeln!(output, "ATTENDANCE SUMMARY: {} to {}", data.start, data.end).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Absent:          {}", s.absent).unwrap();
    writeln!(output, "Pending exit:    {}", s.pending_exit).unwrap();
    writeln!(output, "Present:         {}", s.present).unwrap();
    writeln!(output, "Total rows:      {}", data.total_rows).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Regular hours:   {}", s.regular_hours).unwrap();
    writeln!(output, "Overtime hours:  {}", s.overtime_hours).unwrap();
    writeln!(output, "Mid-shift now:   {}", data.mid_shift).unwrap();

    if data.orphan_events > 0 {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Warning: {} punches reference persons not on the roster.",
            data.orphan_events
        )
        .unwrap();
    }

    output
}

/// Runs the summary command.
pub fn run<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    query: &ReportQuery,
    json: bool,
) -> Result<()> {
    let data = generate_summary_data(snapshot, query)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&data)?)?;
    } else {
        write!(writer, "{}", format_summary(&data))?;
    }

    Ok(())
}
