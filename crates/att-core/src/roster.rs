//! Roster, zones and the snapshot the engine reads from.

use serde::{Deserialize, Serialize};

use crate::event::PunchEvent;
use crate::types::{PersonId, ZoneId};

/// A person enrolled on the terminals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Enrollment number.
    pub person_id: PersonId,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Organizational zone, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,

    /// Whether the person is currently employed.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Person {
    /// Creates an active person without a zone.
    pub fn new(person_id: PersonId, first_name: impl Into<String>) -> Self {
        Self {
            person_id,
            first_name: first_name.into(),
            last_name: None,
            zone_id: None,
            active: true,
        }
    }

    /// "First Last", or just the first name when there is no last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

/// An organizational grouping of persons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub zone_id: ZoneId,
    pub name: String,
}

/// Read-only view over the collections the engine reconciles.
///
/// Implementations hand out borrowed slices; the engine never mutates them
/// and keeps no reference past a single call.
pub trait AttendanceSource {
    /// The full roster, in display order.
    fn persons(&self) -> &[Person];

    /// Known zones.
    fn zones(&self) -> &[Zone];

    /// Every punch, in arbitrary order.
    fn events(&self) -> &[PunchEvent];
}

/// An owned in-memory snapshot of roster, zones and punches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub events: Vec<PunchEvent>,
}

impl Snapshot {
    /// Looks up a zone's display name.
    #[must_use]
    pub fn zone_name(&self, zone_id: &ZoneId) -> Option<&str> {
        self.zones
            .iter()
            .find(|z| &z.zone_id == zone_id)
            .map(|z| z.name.as_str())
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, person_id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| &p.person_id == person_id)
    }
}

impl AttendanceSource for Snapshot {
    fn persons(&self) -> &[Person] {
        &self.persons
    }

    fn zones(&self) -> &[Zone] {
        &self.zones
    }

    fn events(&self) -> &[PunchEvent] {
        &self.events
    }
}
