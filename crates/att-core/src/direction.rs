//! Punch direction as the single source of truth for direction strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way a person passed the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "ENTRY",
            Self::Exit => "EXIT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    /// Parses the canonical names plus the legacy terminal encodings
    /// (`0`/`IN` for entry, `1`/`OUT` for exit). The numeric codes are only
    /// understood here at the boundary and never travel further.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENTRY" | "IN" | "0" => Ok(Self::Entry),
            "EXIT" | "OUT" | "1" => Ok(Self::Exit),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown direction strings.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown punch direction: {0}")]
pub struct UnknownDirection(String);
