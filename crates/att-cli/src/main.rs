use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use att_cli::commands::{audit, devices, report, summary, util};
use att_cli::{Cli, Commands, Config, FilterArgs, RangeArgs};
use att_core::{ReportQuery, Selection, Snapshot};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Load config and read the snapshot it points at.
fn open_snapshot(config_path: Option<&Path>) -> Result<(Snapshot, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let snapshot = util::load_snapshot(&config.snapshot_path)?;
    Ok((snapshot, config))
}

fn build_query(range: &RangeArgs, filter: &FilterArgs, config: &Config) -> ReportQuery {
    ReportQuery::new(range.from, range.to)
        .with_filter(filter.to_filter())
        .with_policy(config.hours_policy())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Report {
            range,
            filter,
            status,
            json,
        }) => {
            let (snapshot, config) = open_snapshot(cli.config.as_deref())?;
            let query = build_query(range, filter, &config);
            report::run(
                &mut out,
                &snapshot,
                &query,
                &Selection::from(*status),
                *json,
            )?;
        }
        Some(Commands::Summary {
            range,
            filter,
            json,
        }) => {
            let (snapshot, config) = open_snapshot(cli.config.as_deref())?;
            let query = build_query(range, filter, &config);
            summary::run(&mut out, &snapshot, &query, *json)?;
        }
        Some(Commands::Audit { person, date, json }) => {
            let (snapshot, _config) = open_snapshot(cli.config.as_deref())?;
            audit::run(&mut out, &snapshot, person, *date, *json)?;
        }
        Some(Commands::Devices { json }) => {
            let (snapshot, _config) = open_snapshot(cli.config.as_deref())?;
            devices::run(&mut out, &snapshot, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
