//! Orrery report tool
//!
//! Prints a single planet's distance or the full day report (orbit
//! snapshot, facts, upcoming events) as JSON for a given date.
//!
//! Usage:
//!   cargo run --bin orrery_report -- [--date 2025-08-07] [--planet mars] [--offline]

use clap::{ArgAction, Parser};

use orrery::report::{self, ReportOptions};
use orrery::OrreryError;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Orrery report tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints planetary distances and the daily orbit report",
    long_about = None
)]
struct Args {
    /// Report date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<String>,

    /// Planet for a single distance lookup; omit for the full day report
    #[arg(short, long)]
    planet: Option<String>,

    /// Skip the network feed lookups (comets, space weather)
    #[arg(long, action = ArgAction::SetTrue)]
    offline: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let date = args
        .date
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let ephemeris = orrery::get_ephemeris()?;
    let options = ReportOptions {
        with_feeds: !args.offline,
        ..ReportOptions::default()
    };

    match args.planet {
        Some(planet) => {
            match report::distance_report_with(&ephemeris, &options, &planet, &date) {
                Ok(answer) => {
                    println!(
                        "{} is {} km from Earth on {}",
                        answer.planet, answer.distance_km, answer.date
                    );
                }
                Err(OrreryError::UnknownBody(name)) => {
                    eprintln!("Planet not found: {}", name);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        None => {
            let day = report::day_report_with(&ephemeris, &options, &date)?;
            println!("{}", serde_json::to_string_pretty(&day)?);
        }
    }

    Ok(())
}
