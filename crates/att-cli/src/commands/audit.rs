//! Audit command: raw punches behind one person-day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use att_core::{PersonId, PunchEvent, Snapshot, audit_trail};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonAudit<'a> {
    person_id: &'a PersonId,
    name: Option<String>,
    date: NaiveDate,
    punches: Vec<&'a PunchEvent>,
}

/// Formats the trail as text.
pub fn format_audit(
    snapshot: &Snapshot,
    person_id: &PersonId,
    date: NaiveDate,
    trail: &[&PunchEvent],
) -> String {
    let mut output = String::new();
    let name = snapshot
        .person(person_id)
        .map_or_else(|| "(not on roster)".to_string(), |p| p.display_name());

    writeln!(output, "AUDIT: {name} ({person_id}) on {date}").unwrap();
    writeln!(output).unwrap();

    if trail.is_empty() {
        writeln!(output, "No punches recorded.").unwrap();
        return output;
    }

    for event in trail {
        writeln!(
            output,
            "{}  {:<5}  {}",
            event.timestamp.format("%H:%M:%S"),
            event.direction.as_str(),
            event.device_id
        )
        .unwrap();
    }

    output
}

/// Runs the audit command.
pub fn run<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    person_id: &PersonId,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let trail = audit_trail(snapshot, person_id, date);
    tracing::debug!(person = %person_id, %date, punches = trail.len(), "audit trail");

    if json {
        let audit = JsonAudit {
            person_id,
            name: snapshot.person(person_id).map(|p| p.display_name()),
            date,
            punches: trail,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&audit)?)?;
    } else {
        write!(writer, "{}", format_audit(snapshot, person_id, date, &trail))?;
    }

    Ok(())
}
