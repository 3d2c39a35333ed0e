//! Command-line argument definitions.

use std::collections::HashSet;
use std::path::PathBuf;

use att_core::{AttendanceStatus, DeviceId, PersonId, ReportFilter, Selection, ZoneId};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Attendance reconciliation for biometric punch clocks.
///
/// Turns raw ENTRY/EXIT punches into one attendance record per person per day.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one attendance row per person per day.
    Report {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Only show rows with this status (present, pending-exit, absent).
        #[arg(long)]
        status: Option<AttendanceStatus>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show status counts and hour totals.
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List every raw punch for one person on one day.
    Audit {
        /// Person ID (enrollment number).
        #[arg(long)]
        person: PersonId,

        /// Day to inspect (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the terminals seen in the punch log.
    Devices {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Inclusive date range.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,
}

/// Report filters.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only persons in this zone.
    #[arg(long)]
    pub zone: Option<ZoneId>,

    /// Only count punches from this terminal.
    #[arg(long)]
    pub device: Option<DeviceId>,

    /// Only these persons (repeatable). Overrides --search.
    #[arg(long = "person")]
    pub persons: Vec<PersonId>,

    /// Match name (case-insensitive) or ID substring.
    #[arg(long)]
    pub search: Option<String>,

    /// Skip inactive persons.
    #[arg(long)]
    pub active_only: bool,
}

impl FilterArgs {
    /// Converts the flags into an engine filter.
    pub fn to_filter(&self) -> ReportFilter {
        ReportFilter {
            zone: Selection::from(self.zone.clone()),
            device: Selection::from(self.device.clone()),
            person_ids: self.persons.iter().cloned().collect::<HashSet<_>>(),
            free_text: self.search.clone(),
            active_only: self.active_only,
        }
    }
}
