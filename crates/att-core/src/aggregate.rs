//! Headline counts over a reconciled set.

use std::collections::HashSet;

use serde::Serialize;

use crate::classify::AttendanceStatus;
use crate::hours::Hours;
use crate::reconcile::AttendanceRecord;

/// Row counts and hour sums for a reconciled set.
///
/// Counts are per row: one person absent on two days counts twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub absent: usize,
    pub pending_exit: usize,
    pub present: usize,
    /// Sum of the already-rounded per-row regular hours.
    pub regular_hours: Hours,
    /// Sum of per-row overtime, kept apart from `regular_hours`.
    pub overtime_hours: Hours,
}

impl Summary {
    /// Total number of rows summarized.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.absent + self.pending_exit + self.present
    }

    /// Row count for one status.
    #[must_use]
    pub const fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::PendingExit => self.pending_exit,
            AttendanceStatus::Present => self.present,
        }
    }
}

/// Summarizes the full row set. Pass the unfiltered records, not a status view.
pub fn summarize(records: &[AttendanceRecord]) -> Summary {
    records.iter().fold(Summary::default(), |mut acc, record| {
        match record.status {
            AttendanceStatus::Absent => acc.absent += 1,
            AttendanceStatus::PendingExit => acc.pending_exit += 1,
            AttendanceStatus::Present => acc.present += 1,
        }
        acc.regular_hours = acc.regular_hours + record.regular_hours;
        acc.overtime_hours = acc.overtime_hours + record.overtime_hours;
        acc
    })
}

/// Number of distinct persons with at least one PENDING_EXIT row.
///
/// This answers "how many people are mid-shift", which is not the same as
/// [`Summary::pending_exit`] once the range spans more than one day.
pub fn mid_shift_headcount(records: &[AttendanceRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.status == AttendanceStatus::PendingExit)
        .map(|r| &r.person_id)
        .collect::<HashSet<_>>()
        .len()
}
