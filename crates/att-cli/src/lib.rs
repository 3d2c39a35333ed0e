//! Attendance CLI library.
//!
//! This crate provides the `att` command-line interface over `att-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, FilterArgs, RangeArgs};
pub use config::Config;
