//! `studyweave` CLI — aggregate calendar availability and place study
//! sessions from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Busy intervals in, free windows out (stdin → stdout)
//! cat busy.json | studyweave free --timezone Europe/Berlin
//!
//! # Custom window hours (defaults to 09:00–17:00 when unset or invalid)
//! studyweave free -i busy.json --start-hour 8 --end-hour 20
//!
//! # Expand a study-plan request into desired events, starting tomorrow
//! studyweave plan -i plan.json --date 2026-06-01
//!
//! # Place desired events into free windows (first fit, input order)
//! studyweave place -i sessions.json -a free.json
//!
//! # Same placement, grouped by calendar date for display
//! studyweave place -i sessions.json -a free.json --grouped
//!
//! # Try a different arrangement, replayed from the original availability
//! studyweave place -i sessions.json -a free.json | studyweave regenerate -a free.json
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{
    AvailabilityMap, BusyDay, DayAvailability, DesiredEvent, PlacedEvent, PlanRequest, WindowHours,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "studyweave",
    version,
    about = "Availability aggregation and first-fit study-session placement"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free windows from per-day busy intervals
    Free {
        /// Input file with busy days (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start hour; both bounds default to 9–17 when missing or invalid
        #[arg(long)]
        start_hour: Option<u32>,
        /// Window end hour; 24 means midnight at the start of the next day
        #[arg(long)]
        end_hour: Option<u32>,
        /// IANA timezone the window hours are resolved in
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Expand a study-plan request into desired events
    Plan {
        /// Input file with the plan request (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Plan date in YYYY-MM-DD; sessions start the day after (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// IANA timezone the session hours are resolved in
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Place desired events into free windows, first fit, in input order
    Place {
        /// Input file with desired events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Per-day availability file, as produced by `free`
        #[arg(short, long)]
        availability: String,
        /// Group the output by calendar date
        #[arg(long)]
        grouped: bool,
    },
    /// Re-pack a previous placement in reverse order for an alternate arrangement
    Regenerate {
        /// Input file with previously placed events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// The original availability snapshot, as produced by `free`
        #[arg(short, long)]
        availability: String,
        /// Group the output by calendar date
        #[arg(long)]
        grouped: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Free {
            input,
            output,
            start_hour,
            end_hour,
            timezone,
        } => {
            let json = read_input(input.as_deref())?;
            let days: Vec<BusyDay> =
                serde_json::from_str(&json).context("Failed to parse busy days")?;
            let hours = WindowHours::resolve(start_hour, end_hour);

            let availability = slot_engine::availability_for_days(&days, hours, &timezone)
                .context("Failed to compute availability")?;

            write_json(output.as_deref(), &availability)?;
        }
        Commands::Plan {
            input,
            output,
            date,
            timezone,
        } => {
            let json = read_input(input.as_deref())?;
            let request: PlanRequest =
                serde_json::from_str(&json).context("Failed to parse plan request")?;
            let plan_date = date.unwrap_or_else(|| Utc::now().date_naive());

            let events = slot_engine::build_plan_events(&request, plan_date, &timezone)
                .context("Failed to expand plan")?;

            write_json(output.as_deref(), &events)?;
        }
        Commands::Place {
            input,
            output,
            availability,
            grouped,
        } => {
            let json = read_input(input.as_deref())?;
            let events: Vec<DesiredEvent> =
                serde_json::from_str(&json).context("Failed to parse desired events")?;
            let map = read_availability(&availability)?;

            let placed = slot_engine::place_events(&events, &map);
            report_dropped(events.len(), placed.len());

            write_placement(output.as_deref(), &placed, grouped)?;
        }
        Commands::Regenerate {
            input,
            output,
            availability,
            grouped,
        } => {
            let json = read_input(input.as_deref())?;
            let placed: Vec<PlacedEvent> =
                serde_json::from_str(&json).context("Failed to parse placed events")?;
            let map = read_availability(&availability)?;

            let replayed = slot_engine::regenerate(&placed, &map);
            report_dropped(placed.len(), replayed.len());

            write_placement(output.as_deref(), &replayed, grouped)?;
        }
    }

    Ok(())
}

/// Load an availability file produced by the `free` subcommand.
fn read_availability(path: &str) -> Result<AvailabilityMap> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read availability file: {}", path))?;
    let days: Vec<DayAvailability> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse availability file: {}", path))?;
    Ok(AvailabilityMap::from_days(days))
}

/// Warn on stderr when placement dropped events. The placement itself
/// carries no per-event error; the length difference is the only signal.
fn report_dropped(requested: usize, placed: usize) {
    if placed < requested {
        eprintln!(
            "Warning: {} of {} events could not be placed",
            requested - placed,
            requested
        );
    }
}

fn write_placement(path: Option<&str>, placed: &[PlacedEvent], grouped: bool) -> Result<()> {
    if grouped {
        write_json(path, &slot_engine::group_by_day(placed))
    } else {
        write_json(path, &placed)
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    write_output(path, &pretty)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
