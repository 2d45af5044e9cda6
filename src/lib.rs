//! Conversion between Gregorian dates and the Vietnamese lunisolar calendar
//! (âm lịch).
//!
//! Lunar months start on the local date of a new moon, the 11th month is the
//! one holding the winter solstice, and a 13-month year repeats the first
//! month lacking a principal term, in the manner of Hồ Ngọc Đức's
//! algorithm. Everything is computed from astronomical series; there are no
//! tables, and any time zone can be used (UTC+7 for Vietnam, UTC+8 for
//! China, UTC+9 for Korea).
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use amlich::{Date, SolarDate};
//!
//! let date = Date::from_calendar(2000, 1, 1).unwrap();
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!(SolarDate::new(2000, 1, 1), date.calendar());
//! ```
//!
//! Lunar calendar:
//!
//! ```
//! use amlich::{LunarDate, Month, SolarDate, TimeZone, lunar_to_solar, solar_to_lunar};
//!
//! let tz = TimeZone::VIETNAM;
//! let mid_autumn = solar_to_lunar(17, 9, 2024, tz).unwrap();
//! assert_eq!(LunarDate::new(2024, Month::Common(8), 15), mid_autumn);
//!
//! let back = lunar_to_solar(15, 8, 2024, false, tz).unwrap();
//! assert_eq!(SolarDate::new(2024, 9, 17), back);
//! ```
//!
//! Accuracy is that of the underlying series: within a minute or so of the
//! true new moons over 1900–2100, drifting slowly outside that range.

pub mod config;
pub mod date;
pub mod error;
pub mod holidays;
pub mod lunar;
pub mod time_scales;

pub use date::{Date, SolarDate, YearType};
pub use error::ConversionError;
pub use lunar::{LunarDate, LunarYear, Month, lunar_to_solar, solar_to_lunar};
pub use time_scales::TimeZone;
