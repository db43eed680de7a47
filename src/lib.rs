// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_config_async;
use crate::config::model::Config;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the config, then announces the sync it would run for
/// the given shift file. Nothing is written to any calendar.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_config_async(&args.config).await?;

    if args.check {
        print_summary(&cfg);
        return Ok(());
    }

    info!(shifts_file = ?args.shifts_file, "starting sync");
    println!("Syncing shifts from {}", args.shifts_file.display());
    Ok(())
}

/// Human-readable overview of a validated config.
pub fn summary(cfg: &Config) -> String {
    let mut out = String::new();
    out.push_str("shiftsync config\n");
    out.push_str(&format!("  timezone = {}\n", cfg.timezone));
    out.push_str(&format!("  deletion_policy = {}\n", cfg.deletion_policy));

    let eh = &cfg.event_handling;
    out.push_str("  event_handling:\n");
    out.push_str(&format!("    duplicate_shifts = {}\n", eh.duplicate_shifts));
    out.push_str(&format!("    overlapping_shifts = {}\n", eh.overlapping_shifts));
    out.push_str(&format!("    api_failures = {}\n", eh.api_failures));
    out.push_str(&format!("    partial_updates = {}\n", eh.partial_updates));
    out.push_str(&format!("    missing_employees = {}\n", eh.missing_employees));
    out.push_str(&format!("    extra_employees = {}\n", eh.extra_employees));

    out.push_str(&format!("\ncalendars ({}):\n", cfg.calendars.len()));
    for cal in &cfg.calendars {
        let names: Vec<&str> = cal.employee_names().collect();
        out.push_str(&format!("  - {}: {:?}\n", cal.calendar_id, names));
    }

    out.push_str(&format!("\nshifts ({}):\n", cfg.shifts.len()));
    for (key, shift) in &cfg.shifts {
        let overnight = if shift.period.is_overnight() { " (overnight)" } else { "" };
        out.push_str(&format!(
            "  - {key}: {} {}-{}{overnight}\n",
            shift.label, shift.period.start, shift.period.end
        ));
    }

    out.push_str(&format!("\nemployees ({}):\n", cfg.employees.len()));
    for (name, employee) in &cfg.employees {
        match employee.color() {
            Some(color) => out.push_str(&format!("  - {name} ({color})\n")),
            None => out.push_str(&format!("  - {name}\n")),
        }
    }
    out
}

fn print_summary(cfg: &Config) {
    print!("{}", summary(cfg));
    debug!("check complete (no sync)");
}
