//! Core domain logic for attendance reconciliation.
//!
//! This crate contains the fundamental types and logic for:
//! - Reconciliation: turning raw punches into one record per person per day
//! - Classification and hours: status and regular/overtime split for a day
//! - Aggregation: headline counts over a reconciled set
//! - Audit: the raw punches behind any computed row

mod aggregate;
mod audit;
pub mod classify;
pub mod direction;
pub mod event;
pub mod filter;
pub mod hours;
mod reconcile;
pub mod roster;
pub mod types;
mod view;

pub use aggregate::{Summary, mid_shift_headcount, summarize};
pub use audit::audit_trail;
pub use classify::{AttendanceStatus, UnknownStatus, status};
pub use direction::{Direction, UnknownDirection};
pub use event::PunchEvent;
pub use filter::{ReportFilter, Selection};
pub use hours::{Hours, HoursPolicy, WorkedHours, worked_hours};
pub use reconcile::{
    AttendanceRecord, DataQualityFlag, Reconciliation, ReconcileError, ReportQuery, reconcile,
};
pub use roster::{AttendanceSource, Person, Snapshot, Zone};
pub use types::{DeviceId, PersonId, ValidationError, ZoneId};
pub use view::{device_catalog, view};
