//! Calendar-independent date and Julian day conversion.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Julian day number of 1582-10-15, the first day of the Gregorian calendar.
pub const GREGORIAN_REFORM_JDN: i32 = 2299161;

/// Earliest supported year (astronomical numbering, JDN 0 falls in it).
pub const MIN_YEAR: i32 = -4712;
/// Latest supported year.
pub const MAX_YEAR: i32 = 9999;

/// Converts a civil date into a Julian day number.
///
/// Dates on or after 1582-10-15 are read as Gregorian, earlier ones as
/// Julian. No validation is done here; see [`Date::from_calendar`].
///
/// # Example
///
/// ```
/// use amlich::date::date_to_julian;
///
/// assert_eq!(2451545, date_to_julian(1, 1, 2000));
/// assert_eq!(date_to_julian(4, 10, 1582) + 1, date_to_julian(15, 10, 1582));
/// ```
pub fn date_to_julian(day: i32, month: i32, year: i32) -> i32 {
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let base = day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4);
    if (year, month, day) >= (1582, 10, 15) {
        base - y.div_euclid(100) + y.div_euclid(400) - 32045
    } else {
        base - 32083
    }
}

/// Converts a Julian day into a civil date, Gregorian from JD 2299160.5 on
/// and Julian before.
///
/// The time of day carried by the fractional part is dropped.
///
/// # Example
///
/// ```
/// use amlich::date::{SolarDate, julian_to_date};
///
/// assert_eq!(SolarDate::new(1582, 10, 4), julian_to_date(2299160.0));
/// assert_eq!(SolarDate::new(1582, 10, 15), julian_to_date(2299161.0));
/// ```
pub fn julian_to_date(jd: f64) -> SolarDate {
    let z = (jd + 0.5).floor();
    let a = if z >= GREGORIAN_REFORM_JDN as f64 {
        let alpha = ((z - 1867216.25) / 36524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();
    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    SolarDate::new(year as i32, month as u32, day as u32)
}

/// A calendar-independent date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i32 {
        self.jdn
    }

    /// Creates a `Date` from a civil calendar date.
    ///
    /// `year` is an astronomical year number, i.e. 1 BC is `0`. Dates before
    /// 1582-10-15 are taken in the Julian calendar.
    ///
    /// # Errors
    ///
    /// Rejects months outside `1..=12`, days outside the month, the ten days
    /// dropped by the Gregorian reform, and years outside
    /// [`MIN_YEAR`]`..=`[`MAX_YEAR`].
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_calendar(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_calendar(2023, 2, 29).is_err());
    /// ```
    pub fn from_calendar(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ConversionError::YearOutOfRange { year });
        }
        let max_day = days_in_month(year, month)?;
        if day == 0 || day > max_day {
            return Err(ConversionError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        if (year, month) == (1582, 10) && (5..=14).contains(&day) {
            return Err(ConversionError::NonexistentDate { year, month, day });
        }
        Ok(Self::from_jdn(date_to_julian(
            day as i32,
            month as i32,
            year,
        )))
    }
    /// Represents the date in the civil calendar (Julian before 1582-10-15).
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{Date, SolarDate};
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!(SolarDate::new(2000, 1, 1), date.calendar());
    /// ```
    pub fn calendar(&self) -> SolarDate {
        julian_to_date(self.jdn as f64)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn - rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.calendar(), f)
    }
}

impl FromStr for Date {
    type Err = ConversionError;

    /// Parses a `YYYY-MM-DD` date and validates it like
    /// [`Date::from_calendar`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<SolarDate>()?.to_date()
    }
}

/// A civil calendar date: day, month and year without any time zone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
    /// Validates the date and converts it into a [`Date`].
    pub fn to_date(&self) -> Result<Date, ConversionError> {
        Date::from_calendar(self.year, self.month, self.day)
    }
}

impl fmt::Display for SolarDate {
    /// Formats the date in ISO 8601 format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for SolarDate {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ConversionError::Unparsable {
            input: s.to_owned(),
        };
        let mut it = s.trim().rsplitn(3, '-');
        let day = it.next().ok_or_else(unparsable)?;
        let month = it.next().ok_or_else(unparsable)?;
        let year = it.next().ok_or_else(unparsable)?;
        Ok(Self::new(
            year.parse().map_err(|_| unparsable())?,
            month.parse().map_err(|_| unparsable())?,
            day.parse().map_err(|_| unparsable())?,
        ))
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year, by the Julian rule up to 1582 and
    /// the Gregorian rule after.
    pub fn from_year(year: i32) -> Self {
        let leap = if year <= 1582 {
            year.rem_euclid(4) == 0
        } else {
            year % 4 == 0 && year % 100 != 0 || year % 400 == 0
        };
        if leap { Self::Leap } else { Self::Common }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(year: i32, month: u32) -> Result<u32, ConversionError> {
    Ok(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_year(year).is_leap() as u32,
        _ => return Err(ConversionError::InvalidMonth { month }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_calendar() {
        let date = Date::from_calendar(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_calendar(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_calendar(-4712, 1, 1).unwrap();
        assert_eq!(0, date.jdn());
    }

    #[test]
    fn to_calendar() {
        let date = Date::from_jdn(2440588);
        assert_eq!(SolarDate::new(1970, 1, 1), date.calendar());
        let date = Date::from_jdn(2459466);
        assert_eq!(SolarDate::new(2021, 9, 8), date.calendar());
        let date = Date::from_jdn(0);
        assert_eq!(SolarDate::new(-4712, 1, 1), date.calendar());
    }

    #[test]
    fn reform_boundary() {
        assert_eq!(2299160, date_to_julian(4, 10, 1582));
        assert_eq!(2299161, date_to_julian(15, 10, 1582));
        let before = Date::from_calendar(1582, 10, 4).unwrap();
        let after = Date::from_calendar(1582, 10, 15).unwrap();
        assert_eq!(1, after - before);
        assert_eq!(SolarDate::new(1582, 10, 15), (before + 1).calendar());
        assert_eq!(before, after - 1);
    }

    #[test]
    fn day_arithmetic() {
        let date = Date::from_calendar(2025, 3, 1).unwrap();
        assert_eq!(SolarDate::new(2025, 2, 28), (date - 1).calendar());
        assert_eq!(date + 10, date - -10);
        assert_eq!(30, date - (date - 30));
    }

    #[test]
    fn reform_gap_rejected() {
        for day in 5..=14 {
            assert_eq!(
                Err(ConversionError::NonexistentDate {
                    year: 1582,
                    month: 10,
                    day
                }),
                Date::from_calendar(1582, 10, day)
            );
        }
    }

    #[test]
    fn invalid_fields_rejected() {
        assert_eq!(
            Err(ConversionError::InvalidMonth { month: 13 }),
            Date::from_calendar(2024, 13, 1)
        );
        assert_eq!(
            Err(ConversionError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28
            }),
            Date::from_calendar(1900, 2, 29)
        );
        assert_eq!(
            Err(ConversionError::InvalidDay {
                day: 0,
                month: 4,
                max_day: 30
            }),
            Date::from_calendar(2024, 4, 0)
        );
        assert_eq!(
            Err(ConversionError::YearOutOfRange { year: 10000 }),
            Date::from_calendar(10000, 1, 1)
        );
        // Julian rule: 1500 is a leap year
        assert!(Date::from_calendar(1500, 2, 29).is_ok());
    }

    #[test]
    fn monotonic_across_reform() {
        let mut date = Date::from_calendar(1582, 1, 1).unwrap();
        let mut last = date.calendar();
        for _ in 0..730 {
            date = date + 1;
            let next = date.calendar();
            assert!(next > last, "{last} -> {next}");
            assert_eq!(Ok(date), next.to_date());
            last = next;
        }
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_calendar(2021, 9, 8).unwrap().to_string()
        );
    }

    #[test]
    fn parse() {
        assert_eq!(Ok(SolarDate::new(2025, 1, 29)), "2025-01-29".parse());
        assert_eq!(Ok(SolarDate::new(-500, 3, 1)), "-500-03-01".parse());
        assert!("2025/01/29".parse::<SolarDate>().is_err());
        assert!("2025-02-30".parse::<Date>().is_err());
    }
}

#[cfg(test)]
mod tests_priv {
    use super::*;

    #[test]
    fn priv_days_in_month() {
        assert_eq!(Ok(29), days_in_month(2024, 2));
        assert_eq!(Ok(28), days_in_month(2100, 2));
        assert_eq!(Ok(29), days_in_month(1300, 2));
        assert_eq!(Ok(31), days_in_month(2024, 12));
    }
}
