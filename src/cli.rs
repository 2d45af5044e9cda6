use std::path::PathBuf;

use amlich::Date;
use clap::{Parser, Subcommand};

/// Vietnamese lunar calendar converter.
#[derive(Parser)]
#[command(
    name = "amlich",
    version,
    about = "Convert between solar dates and the Vietnamese lunar calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML settings file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Time zone in hours east of UTC, overriding the settings.
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub tz: Option<f64>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a solar date (YYYY-MM-DD) to the lunar calendar.
    ToLunar(ToLunarArgs),
    /// Convert a lunar date to a solar date.
    ToSolar(ToSolarArgs),
    /// List upcoming holidays.
    Holidays(HolidaysArgs),
}

/// Arguments for the `to-lunar` subcommand.
#[derive(clap::Args)]
pub struct ToLunarArgs {
    /// Solar date, YYYY-MM-DD.
    pub date: Date,
}

/// Arguments for the `to-solar` subcommand.
#[derive(clap::Args)]
pub struct ToSolarArgs {
    /// Lunar year.
    #[arg(allow_hyphen_values = true)]
    pub year: i32,
    /// Lunar month, 1-12.
    pub month: u32,
    /// Lunar day, 1-30.
    pub day: u32,
    /// The month is the leap month.
    #[arg(long)]
    pub leap: bool,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Count from this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub from: Option<Date>,
}
