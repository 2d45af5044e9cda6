mod cli;
mod logging;

use std::process;

use amlich::config::Settings;
use amlich::{Date, TimeZone, lunar_to_solar, solar_to_lunar};
use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(hours) = cli.tz {
        settings.time_zone = TimeZone::from_hours(hours)?;
    }
    let tz = settings.time_zone;
    info!(tz = tz.hours(), "using time zone");

    match cli.command {
        Command::ToLunar(args) => {
            let solar = args.date.calendar();
            let lunar = solar_to_lunar(solar.day, solar.month, solar.year, tz)?;
            let leap = if lunar.is_leap() { " (leap)" } else { "" };
            println!(
                "{solar} -> {}-{:02}-{:02}{leap}",
                lunar.year,
                lunar.month.num(),
                lunar.day
            );
        }
        Command::ToSolar(args) => {
            let solar = lunar_to_solar(args.day, args.month, args.year, args.leap, tz)?;
            println!("{solar}");
        }
        Command::Holidays(args) => {
            let from = match args.from {
                Some(date) => date,
                None => today()?,
            };
            for holiday in &settings.holidays {
                let date = holiday
                    .next_occurrence(from, tz)
                    .with_context(|| format!("holiday {}", holiday.id))?;
                println!("{date}  {:>4} days  {}", date - from, holiday.title);
            }
        }
    }
    Ok(())
}

fn today() -> Result<Date> {
    let now = chrono::Local::now().date_naive();
    Ok(Date::from_calendar(now.year(), now.month(), now.day())?)
}
