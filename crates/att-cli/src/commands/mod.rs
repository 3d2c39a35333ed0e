//! CLI subcommand implementations.

pub mod audit;
pub mod devices;
pub mod report;
pub mod summary;
pub mod util;
