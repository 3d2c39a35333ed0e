//! Raw punch drill-down behind a computed row.

use chrono::NaiveDate;

use crate::event::PunchEvent;
use crate::roster::AttendanceSource;
use crate::types::PersonId;

/// Every punch `person_id` made on `date`, oldest first.
///
/// Report filters are deliberately not applied, so duplicate and bounce
/// punches hidden by the day summary stay visible. Punches with identical
/// timestamps keep their store order.
pub fn audit_trail<'a, S: AttendanceSource + ?Sized>(
    source: &'a S,
    person_id: &PersonId,
    date: NaiveDate,
) -> Vec<&'a PunchEvent> {
    let mut trail: Vec<&PunchEvent> = source
        .events()
        .iter()
        .filter(|e| &e.person_id == person_id && e.date() == date)
        .collect();
    trail.sort_by_key(|e| e.timestamp);
    trail
}
