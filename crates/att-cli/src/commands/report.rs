//! Report command for listing daily attendance rows.
//!
//! This module implements `att report` with the range/filter flags, an
//! optional status view (`--status`) and output formats (table, JSON).

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use att_core::{
    AttendanceRecord, AttendanceStatus, DataQualityFlag, Person, PersonId, Reconciliation, ReportQuery, Selection,
    Snapshot, Summary, reconcile, summarize, view,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::util::{PLACEHOLDER, format_clock, roster_index, zone_label};

/// A reconciled range ready for rendering.
#[derive(Debug)]
pub struct ReportData {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub result: Reconciliation,
}

/// Runs the engine for `query`.
pub fn generate_report_data(snapshot: &Snapshot, query: &ReportQuery) -> Result<ReportData> {
    let result = reconcile(snapshot, query)?;
    Ok(ReportData {
        start: query.start,
        end: query.end,
        result,
    })
}

// ========== Table Output ==========

fn table_line(out: &mut String, cells: [&str; 10]) {
    let [date, id, name, zone, entry, exit, hours, extra, device, status] = cells;
    writeln!(
        out,
        "{date:<10}  {id:<8}  {name:<20}  {zone:<12}  {entry:<5}  {exit:<5}  {hours:>6}  {extra:>6}  {device:<8}  {status}"
    )
    .unwrap();
}

fn status_cell(record: &AttendanceRecord) -> String {
    if record.flags.is_empty() {
        return record.status.to_string();
    }
    let flags: Vec<&str> = record
        .flags
        .iter()
        .copied()
        .map(DataQualityFlag::as_str)
        .collect();
    format!("{} [{}]", record.status, flags.join(","))
}

fn person_name(roster: &HashMap<&PersonId, &Person>, id: &PersonId) -> String {
    roster
        .get(id)
        .map_or_else(|| PLACEHOLDER.to_string(), |p| p.display_name())
}

/// Formats the human-readable report.
pub fn format_report(
    snapshot: &Snapshot,
    data: &ReportData,
    status: &Selection<AttendanceStatus>,
) -> String {
    let mut output = String::new();
    writeln!(output, "ATTENDANCE REPORT: {} to {}", data.start, data.end).unwrap();

    let rows = view(&data.result.records, status);
    if rows.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No rows match the current filters.").unwrap();
        write_orphan_warning(&mut output, data.result.orphan_events);
        return output;
    }

    let roster = roster_index(snapshot);

    writeln!(output).unwrap();
    table_line(
        &mut output,
        [
            "DATE", "ID", "NAME", "ZONE", "IN", "OUT", "HOURS", "EXTRA", "DEVICE", "STATUS",
        ],
    );
    for row in &rows {
        let date = row.date.to_string();
        let name = person_name(&roster, &row.person_id);
        let zone = zone_label(snapshot, row.zone_id.as_ref());
        let entry = format_clock(row.first_entry);
        let exit = format_clock(row.last_exit);
        let hours = row.regular_hours.to_string();
        let extra = row.overtime_hours.to_string();
        let device = row.device_id.as_ref().map_or(PLACEHOLDER, |d| d.as_str());
        let status = status_cell(row);
        table_line(
            &mut output,
            [
                date.as_str(),
                row.person_id.as_str(),
                name.as_str(),
                zone.as_str(),
                entry.as_str(),
                exit.as_str(),
                hours.as_str(),
                extra.as_str(),
                device,
                status.as_str(),
            ],
        );
    }

    writeln!(output).unwrap();
    let total = data.result.records.len();
    match status {
        Selection::All => writeln!(output, "{total} rows").unwrap(),
        Selection::Only(s) => writeln!(output, "{} of {total} rows ({s})", rows.len()).unwrap(),
    }
    write_orphan_warning(&mut output, data.result.orphan_events);

    output
}

fn write_orphan_warning(output: &mut String, orphan_events: usize) {
    if orphan_events > 0 {
        writeln!(
            output,
            "Warning: {orphan_events} punches reference persons not on the roster."
        )
        .unwrap();
    }
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub orphan_events: usize,
    /// Computed over every row, before the status view.
    pub summary: Summary,
    pub rows: Vec<JsonRow<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonRow<'a> {
    pub name: Option<String>,
    pub zone_name: Option<String>,
    #[serde(flatten)]
    pub record: &'a AttendanceRecord,
}

/// Formats report data as JSON.
pub fn format_report_json(
    snapshot: &Snapshot,
    data: &ReportData,
    status: &Selection<AttendanceStatus>,
) -> Result<String> {
    let roster = roster_index(snapshot);
    let rows = view(&data.result.records, status)
        .into_iter()
        .map(|record| JsonRow {
            name: roster.get(&record.person_id).map(|p| p.display_name()),
            zone_name: record
                .zone_id
                .as_ref()
                .and_then(|z| snapshot.zone_name(z))
                .map(String::from),
            record,
        })
        .collect();

    let report = JsonReport {
        start: data.start,
        end: data.end,
        orphan_events: data.result.orphan_events,
        summary: summarize(&data.result.records),
        rows,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    query: &ReportQuery,
    status: &Selection<AttendanceStatus>,
    json: bool,
) -> Result<()> {
    let data = generate_report_data(snapshot, query)?;

    if json {
        writeln!(writer, "{}", format_report_json(snapshot, &data, status)?)?;
    } else {
        write!(writer, "{}", format_report(snapshot, &data, status))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn snapshot() -> Snapshot {
        serde_json::from_str(
            r#"{
                "zones": [{"zone_id": "z1", "name": "Warehouse"}],
                "persons": [
                    {"person_id": "p1", "first_name": "Ana", "last_name": "Lopez", "zone_id": "z1"},
                    {"person_id": "p2", "first_name": "Bruno"}
                ],
                "events": [
                    {"person_id": "p1", "timestamp": "2024-05-20T17:30:00", "direction": "EXIT", "device_id": "DEV-B"},
                    {"person_id": "p1", "timestamp": "2024-05-20T08:00:00", "direction": "ENTRY", "device_id": "DEV-A"},
                    {"person_id": "p2", "timestamp": "2024-05-21T09:00:00", "direction": "ENTRY", "device_id": "DEV-A"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn query(from: u32, to: u32) -> ReportQuery {
        ReportQuery::new(
            NaiveDate::from_ymd_opt(2024, 5, from).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, to).unwrap(),
        )
    }

    #[test]
    fn test_report_table() {
        let snapshot = snapshot();
        let data = generate_report_data(&snapshot, &query(20, 21)).unwrap();

        let output = format_report(&snapshot, &data, &Selection::All);
        assert_snapshot!(output, @r"
        ATTENDANCE REPORT: 2024-05-20 to 2024-05-21

        DATE        ID        NAME                  ZONE          IN     OUT     HOURS   EXTRA  DEVICE    STATUS
        2024-05-21  p1        Ana Lopez             Warehouse     --:--  --:--    0.00    0.00  --        ABSENT
        2024-05-21  p2        Bruno                 --            09:00  --:--    0.00    0.00  DEV-A     PENDING_EXIT
        2024-05-20  p1        Ana Lopez             Warehouse     08:00  17:30    8.00    1.50  DEV-A     PRESENT
        2024-05-20  p2        Bruno                 --            --:--  --:--    0.00    0.00  --        ABSENT

        4 rows
        ");
    }

    #[test]
    fn test_report_status_view() {
        let snapshot = snapshot();
        let data = generate_report_data(&snapshot, &query(20, 21)).unwrap();

        let output = format_report(
            &snapshot,
            &data,
            &Selection::Only(AttendanceStatus::Absent),
        );
        assert!(output.contains("2 of 4 rows (ABSENT)"));
        assert!(!output.contains("PRESENT"));
    }

    #[test]
    fn test_report_empty_qualifying_set() {
        let snapshot = snapshot();
        let mut query = query(20, 21);
        query.filter.free_text = Some("nobody".to_string());
        let data = generate_report_data(&snapshot, &query).unwrap();

        let output = format_report(&snapshot, &data, &Selection::All);
        assert_snapshot!(output, @r"
        ATTENDANCE REPORT: 2024-05-20 to 2024-05-21

        No rows match the current filters.
        ");
    }

    #[test]
    fn test_report_flags_negative_duration_and_orphans() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "persons": [{"person_id": "p1", "first_name": "Ana"}],
                "events": [
                    {"person_id": "p1", "timestamp": "2024-05-20T07:00:00", "direction": "EXIT", "device_id": "DEV-A"},
                    {"person_id": "p1", "timestamp": "2024-05-20T09:00:00", "direction": "ENTRY", "device_id": "DEV-A"},
                    {"person_id": "p9", "timestamp": "2024-05-20T09:00:00", "direction": "ENTRY", "device_id": "DEV-A"}
                ]
            }"#,
        )
        .unwrap();
        let data = generate_report_data(&snapshot, &query(20, 20)).unwrap();

        let output = format_report(&snapshot, &data, &Selection::All);
        assert!(output.contains("PRESENT [NEGATIVE_DURATION]"));
        assert!(output.contains("Warning: 1 punches reference persons not on the roster."));
    }

    #[test]
    fn test_report_json_output() {
        let snapshot = snapshot();
        let data = generate_report_data(&snapshot, &query(20, 20)).unwrap();

        let output = format_report_json(
            &snapshot,
            &data,
            &Selection::Only(AttendanceStatus::Present),
        )
        .unwrap();
        assert_snapshot!(output, @r#"
        {
          "start": "2024-05-20",
          "end": "2024-05-20",
          "orphan_events": 0,
          "summary": {
            "absent": 1,
            "pending_exit": 0,
            "present": 1,
            "regular_hours": 8.0,
            "overtime_hours": 1.5
          },
          "rows": [
            {
              "name": "Ana Lopez",
              "zone_name": "Warehouse",
              "date": "2024-05-20",
              "person_id": "p1",
              "zone_id": "z1",
              "device_id": "DEV-A",
              "first_entry": "2024-05-20T08:00:00",
              "last_exit": "2024-05-20T17:30:00",
              "regular_hours": 8.0,
              "overtime_hours": 1.5,
              "status": "PRESENT"
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let snapshot = snapshot();
        let err = generate_report_data(&snapshot, &query(21, 20)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid date range: end 2024-05-20 is before start 2024-05-21"
        );
    }
}
