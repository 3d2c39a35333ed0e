//! Devices command: terminals seen in the punch log.

use std::io::Write;

use anyhow::Result;
use att_core::{Snapshot, device_catalog};

/// Runs the devices command.
pub fn run<W: Write>(writer: &mut W, snapshot: &Snapshot, json: bool) -> Result<()> {
    let devices = device_catalog(&snapshot.events);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&devices)?)?;
        return Ok(());
    }

    if devices.is_empty() {
        writeln!(writer, "No devices found.")?;
        return Ok(());
    }
    for device in devices {
        writeln!(writer, "{device}")?;
    }
    Ok(())
}
