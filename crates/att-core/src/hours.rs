//! Regular and overtime hours for a day.
//!
//! Hours are rounded half-up to two decimals once per row and then carried as
//! an exact count of hundredths, so totals always equal the sum of the rows a
//! reader can see.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

const MS_PER_HOUR: i64 = 3_600_000;

/// Rules for splitting a day's elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursPolicy {
    /// Elapsed time counted as regular before overtime starts.
    /// Default: 28800000 (8 hours).
    pub regular_day_ms: i64,
}

impl Default for HoursPolicy {
    fn default() -> Self {
        Self {
            regular_day_ms: 8 * MS_PER_HOUR,
        }
    }
}

impl HoursPolicy {
    /// Builds a policy from a whole number of minutes.
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            regular_day_ms: i64::from(minutes) * 60_000,
        }
    }
}

/// A non-negative number of hours with two-decimal precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hours(u64);

impl Hours {
    pub const ZERO: Self = Self(0);

    /// Creates a value from hundredths of an hour.
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Rounds a millisecond duration half-up to the nearest hundredth of an
    /// hour. Negative input is treated as zero.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_millis_rounded(ms: i64) -> Self {
        if ms <= 0 {
            return Self::ZERO;
        }
        // One hundredth of an hour is 36 seconds; add half of it before dividing.
        Self(((ms * 100 + MS_PER_HOUR / 2) / MS_PER_HOUR) as u64)
    }

    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Hours {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl Add for Hours {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Regular/overtime split for one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkedHours {
    pub regular: Hours,
    pub overtime: Hours,
    /// The exit preceded the entry and the duration was clamped to zero.
    pub clamped: bool,
}

/// Computes regular and overtime hours between a first entry and last exit.
///
/// Either endpoint missing yields zero hours.
#[must_use]
pub fn worked_hours(
    first_entry: Option<NaiveDateTime>,
    last_exit: Option<NaiveDateTime>,
    policy: &HoursPolicy,
) -> WorkedHours {
    let (Some(entry), Some(exit)) = (first_entry, last_exit) else {
        return WorkedHours::default();
    };

    let raw_ms = (exit - entry).num_milliseconds();
    let elapsed_ms = raw_ms.max(0);
    let threshold_ms = policy.regular_day_ms.max(0);
    let clamped = raw_ms < 0;

    if elapsed_ms > threshold_ms {
        WorkedHours {
            regular: Hours::from_millis_rounded(threshold_ms),
            overtime: Hours::from_millis_rounded(elapsed_ms - threshold_ms),
            clamped,
        }
    } else {
        WorkedHours {
            regular: Hours::from_millis_rounded(elapsed_ms),
            overtime: Hours::ZERO,
            clamped,
        }
    }
}
