//! Report filters and roster qualification.

use std::collections::HashSet;

use crate::roster::Person;
use crate::types::{DeviceId, PersonId, ZoneId};

/// Either every value, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Unfiltered.
    All,
    /// Restricted to a single value.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns true if `value` passes this selection.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Like [`Self::matches`], for optional attributes. A missing value only
    /// passes the unfiltered selection.
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (Self::Only(wanted), Some(value)) => wanted == value,
            (Self::Only(_), None) => false,
        }
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Filters applied to a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Person-level: restrict to one zone.
    pub zone: Selection<ZoneId>,

    /// Event-level: only punches from this terminal count towards a day.
    pub device: Selection<DeviceId>,

    /// Explicit allowlist. Empty means unconstrained. When non-empty it takes
    /// precedence over `free_text`.
    pub person_ids: HashSet<PersonId>,

    /// Case-insensitive name match or raw id substring. Empty means unconstrained.
    pub free_text: Option<String>,

    /// Drop persons flagged inactive.
    pub active_only: bool,
}

impl ReportFilter {
    /// Returns true if `person` belongs to the qualifying set.
    pub fn qualifies(&self, person: &Person) -> bool {
        if self.active_only && !person.active {
            return false;
        }
        if !self.zone.matches_opt(person.zone_id.as_ref()) {
            return false;
        }
        if !self.person_ids.is_empty() {
            return self.person_ids.contains(&person.person_id);
        }
        match self.free_text.as_deref() {
            Some(text) if !text.is_empty() => matches_free_text(person, text),
            _ => true,
        }
    }

    /// The qualifying persons, in roster order.
    pub fn qualifying<'a>(&self, persons: &'a [Person]) -> Vec<&'a Person> {
        persons.iter().filter(|p| self.qualifies(p)).collect()
    }
}

fn matches_free_text(person: &Person, text: &str) -> bool {
    let full_name = format!(
        "{} {}",
        person.first_name,
        person.last_name.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    full_name.contains(&text.to_lowercase()) || person.person_id.as_str().contains(text)
}
