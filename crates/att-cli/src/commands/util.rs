//! Shared utilities for CLI commands.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use att_core::{Person, PersonId, Snapshot, ZoneId};
use chrono::NaiveDateTime;

/// Shown in place of a missing device or zone.
pub const PLACEHOLDER: &str = "--";

/// Reads a JSON snapshot of zones, persons and punches.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;

    tracing::debug!(
        zones = snapshot.zones.len(),
        persons = snapshot.persons.len(),
        events = snapshot.events.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Formats a punch time as `HH:MM`, or `--:--` when missing.
pub fn format_clock(ts: Option<NaiveDateTime>) -> String {
    ts.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}

/// Indexes the roster by person ID.
pub fn roster_index(snapshot: &Snapshot) -> HashMap<&PersonId, &Person> {
    snapshot
        .persons
        .iter()
        .map(|p| (&p.person_id, p))
        .collect()
}

/// Display name for a zone, falling back to its ID, or `--` without a zone.
pub fn zone_label(snapshot: &Snapshot, zone_id: Option<&ZoneId>) -> String {
    match zone_id {
        Some(id) => snapshot
            .zone_name(id)
            .map_or_else(|| id.to_string(), String::from),
        None => PLACEHOLDER.to_string(),
    }
}
