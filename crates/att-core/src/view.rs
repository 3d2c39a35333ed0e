//! Display-side helpers over a reconciled set.

use std::collections::HashSet;

use crate::classify::AttendanceStatus;
use crate::event::PunchEvent;
use crate::filter::Selection;
use crate::reconcile::AttendanceRecord;
use crate::types::DeviceId;

/// Rows matching `status`, newest day first.
///
/// The sort is stable, so rows for the same day keep roster order.
pub fn view<'a>(
    records: &'a [AttendanceRecord],
    status: &Selection<AttendanceStatus>,
) -> Vec<&'a AttendanceRecord> {
    let mut rows: Vec<&AttendanceRecord> =
        records.iter().filter(|r| status.matches(&r.status)).collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Distinct terminals seen in `events`, in first-seen order.
pub fn device_catalog(events: &[PunchEvent]) -> Vec<&DeviceId> {
    let mut seen = HashSet::new();
    events
        .iter()
        .map(|e| &e.device_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
