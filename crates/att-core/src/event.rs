//! Raw punch events captured by biometric terminals.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::types::{DeviceId, PersonId};

/// One timestamped ENTRY or EXIT signal from a device for one person.
///
/// `timestamp` is the site-local wall-clock time reported by the terminal.
/// Day boundaries are taken from it directly, so a punch at `23:59:59` and one
/// at `00:00:00` the next morning always land on different days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Who punched.
    pub person_id: PersonId,
    /// When the punch was captured.
    pub timestamp: NaiveDateTime,
    /// Entry or exit.
    pub direction: Direction,
    /// The terminal that captured the punch.
    pub device_id: DeviceId,
}

impl PunchEvent {
    /// Calendar day this punch belongs to.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
