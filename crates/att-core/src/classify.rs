//! Daily attendance status.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of one person on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Entered and left.
    Present,
    /// Entered, no exit recorded yet.
    PendingExit,
    /// No entry recorded. An exit on its own does not count.
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::PendingExit => "PENDING_EXIT",
            Self::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for unknown status strings.
#[derive(Debug, Clone, Error)]
#[error("unknown attendance status: {0}")]
pub struct UnknownStatus(String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "present" => Ok(Self::Present),
            "pending_exit" | "pending" => Ok(Self::PendingExit),
            "absent" => Ok(Self::Absent),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Classifies a day from the presence of its first entry and last exit.
#[must_use]
pub const fn status(
    first_entry: Option<NaiveDateTime>,
    last_exit: Option<NaiveDateTime>,
) -> AttendanceStatus {
    match (first_entry, last_exit) {
        (Some(_), Some(_)) => AttendanceStatus::Present,
        (Some(_), None) => AttendanceStatus::PendingExit,
        (None, _) => AttendanceStatus::Absent,
    }
}
