//! Reconciliation of raw punches into daily attendance records.
//!
//! # Algorithm Summary
//!
//! 1. Reject ranges whose end precedes their start
//! 2. Resolve the qualifying person set from the roster and filters
//! 3. Index in-range punches by (person, day), dropping orphans and applying
//!    the device filter at the punch level
//! 4. Walk every calendar day in range and emit one record per qualifying
//!    person, including days with no punches at all

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::classify::{AttendanceStatus, status};
use crate::direction::Direction;
use crate::event::PunchEvent;
use crate::filter::ReportFilter;
use crate::hours::{Hours, HoursPolicy, worked_hours};
use crate::roster::{AttendanceSource, Person};
use crate::types::{DeviceId, PersonId, ZoneId};

/// Errors that fail a reconciliation call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The requested end date is before the start date.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// Irregularities that do not fail a pass but should be visible on the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQualityFlag {
    /// The last exit preceded the first entry; hours were clamped to zero.
    NegativeDuration,
}

impl DataQualityFlag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NegativeDuration => "NEGATIVE_DURATION",
        }
    }
}

/// What to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
    pub filter: ReportFilter,
    pub policy: HoursPolicy,
}

impl ReportQuery {
    /// A query over `[start, end]` with no filters and the default policy.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            filter: ReportFilter::default(),
            policy: HoursPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: HoursPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One person's attendance on one day. Computed per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub person_id: PersonId,
    pub zone_id: Option<ZoneId>,
    /// Terminal of the day's chronologically first punch, `None` when the day
    /// has no punches after device filtering.
    pub device_id: Option<DeviceId>,
    /// Earliest ENTRY of the day.
    pub first_entry: Option<NaiveDateTime>,
    /// Latest EXIT of the day. Not necessarily paired with `first_entry`.
    pub last_exit: Option<NaiveDateTime>,
    pub regular_hours: Hours,
    pub overtime_hours: Hours,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<DataQualityFlag>,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Day-ascending, roster order within a day.
    pub records: Vec<AttendanceRecord>,

    /// In-range punches whose person is not on the roster. They are excluded
    /// from `records`.
    pub orphan_events: usize,
}

type DayKey<'a> = (&'a PersonId, NaiveDate);

/// Reconciles punches into one record per qualifying person per day.
///
/// A qualifying person with no punches on a day still gets an ABSENT record.
/// If nobody qualifies, every day yields zero records.
pub fn reconcile<S: AttendanceSource + ?Sized>(
    source: &S,
    query: &ReportQuery,
) -> Result<Reconciliation, ReconcileError> {
    let ReportQuery {
        start,
        end,
        filter,
        policy,
    } = query;
    let (start, end) = (*start, *end);

    if end < start {
        return Err(ReconcileError::InvalidRange { start, end });
    }

    let persons = filter.qualifying(source.persons());
    let roster: HashSet<&PersonId> = source.persons().iter().map(|p| &p.person_id).collect();

    let mut by_day: HashMap<DayKey<'_>, Vec<&PunchEvent>> = HashMap::new();
    let mut orphan_events = 0;
    for event in source.events() {
        let date = event.date();
        if date < start || date > end {
            continue;
        }
        if !roster.contains(&event.person_id) {
            orphan_events += 1;
            continue;
        }
        if !filter.device.matches(&event.device_id) {
            continue;
        }
        by_day.entry((&event.person_id, date)).or_default().push(event);
    }

    let mut records = Vec::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        for person in &persons {
            let punches = by_day
                .get(&(&person.person_id, date))
                .map_or(&[][..], Vec::as_slice);
            records.push(summarize_day(person, date, punches, policy));
        }
    }

    tracing::debug!(
        qualifying = persons.len(),
        events = source.events().len(),
        records = records.len(),
        "reconciled attendance"
    );
    if orphan_events > 0 {
        tracing::warn!(
            orphan_events,
            "punches reference persons missing from the roster"
        );
    }

    Ok(Reconciliation {
        records,
        orphan_events,
    })
}

fn summarize_day(
    person: &Person,
    date: NaiveDate,
    punches: &[&PunchEvent],
    policy: &HoursPolicy,
) -> AttendanceRecord {
    let first_entry = punches
        .iter()
        .filter(|p| p.direction == Direction::Entry)
        .map(|p| p.timestamp)
        .min();
    let last_exit = punches
        .iter()
        .filter(|p| p.direction == Direction::Exit)
        .map(|p| p.timestamp)
        .max();
    let device_id = punches
        .iter()
        .min_by_key(|p| p.timestamp)
        .map(|p| p.device_id.clone());

    let worked = worked_hours(first_entry, last_exit, policy);
    let mut flags = Vec::new();
    if worked.clamped {
        flags.push(DataQualityFlag::NegativeDuration);
    }

    AttendanceRecord {
        date,
        person_id: person.person_id.clone(),
        zone_id: person.zone_id.clone(),
        device_id,
        first_entry,
        last_exit,
        regular_hours: worked.regular,
        overtime_hours: worked.overtime,
        status: status(first_entry, last_exit),
        flags,
    }
}
