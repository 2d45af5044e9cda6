//! Vietnamese lunisolar calendar (âm lịch).
//!
//! A lunar year is laid out between two consecutive month-11 new moons, each
//! month starting on the local date of a new moon. When the span holds 13
//! lunations, the first month without a principal term is the leap month and
//! repeats the number of the month before it.
//!
//! Dates depend on the time zone the new moons are reckoned in: the
//! Vietnamese calendar uses UTC+7, the Chinese one UTC+8.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{Date, MAX_YEAR, MIN_YEAR, SolarDate};
use crate::error::ConversionError;
use crate::time_scales::TimeZone;

pub mod ephemeris;
pub mod solar_term;

pub use solar_term::{SolarTerm, solar_term_for};

/// The span between two month-11 new moons, from month 11 of the previous
/// year through month 10 (or leap month 10).
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::lunar::{LunarYear, Month::*};
/// use amlich::time_scales::TimeZone;
///
/// let date = Date::from_calendar(2000, 1, 1).unwrap();
/// let year = LunarYear::from_date(date, TimeZone::VIETNAM).unwrap();
///
/// let lunar = year.ymd_for(date).unwrap();
/// assert_eq!((1999, Common(11), 25), (lunar.year, lunar.month, lunar.day));
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// The year in which months 1 to 10 fall
    pub year: i32,
    /// Time zone the new moons were reckoned in
    pub time_zone: TimeZone,
    /// All month starts, plus month 11 of the next year to mark the end
    pub months: Vec<NewMoon>,
}

/// Start of a lunar month.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NewMoon {
    /// Label of the month that starts here
    pub month: Month,
    /// Local date of the new moon
    pub date: Date,
}

/// Month label: `Common` for an ordinary month, `Leap` for a leap month.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Month number, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for a leap month.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    fn new(num: u32, is_leap: bool) -> Self {
        if is_leap {
            Self::Leap(num)
        } else {
            Self::Common(num)
        }
    }
}

/// A date in the lunar calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: Month,
    pub day: u32,
}

impl LunarDate {
    pub fn new(year: i32, month: Month, day: u32) -> Self {
        Self { year, month, day }
    }
    /// `true` if the date falls in a leap month.
    pub fn is_leap(&self) -> bool {
        self.month.is_leap()
    }
}

/// Tells that a date lies before or after a [`LunarYear`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherYear {
    Before,
    After,
}

impl LunarYear {
    /// Lays out the lunar year whose months 1 to 10 fall in solar year
    /// `year`.
    ///
    /// # Errors
    ///
    /// Fails if a month-11 anchor cannot be found or the span between the
    /// anchors is not 12 or 13 lunations with a placeable leap month.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::lunar::{LunarYear, Month};
    /// use amlich::time_scales::TimeZone;
    ///
    /// let year = LunarYear::new(2017, TimeZone::VIETNAM).unwrap();
    /// assert_eq!(Some(6), year.leap_month());
    /// assert_eq!("2017-07-23", year.months[8].date.to_string());
    /// assert_eq!(Month::Leap(6), year.months[8].month);
    /// ```
    pub fn new(year: i32, tz: TimeZone) -> Result<Self, ConversionError> {
        let start = ephemeris::lunar_month_11(year, tz)?;
        let end = ephemeris::lunar_month_11(year + 1, tz)?;
        Self::between(year, start, end, tz)
    }

    /// Lays out the months from the anchor `start` up to the anchor `end`.
    fn between(
        year: i32,
        start: Date,
        end: Date,
        tz: TimeZone,
    ) -> Result<Self, ConversionError> {
        use crate::lunar::ephemeris::{SYNODIC_MONTH, leap_month_offset, lunation_index, new_moon_day};

        let k = lunation_index(start);
        let lunations = ((end - start) as f64 / SYNODIC_MONTH).round() as i32;
        let leap_offset = match lunations {
            12 => None,
            13 => match leap_month_offset(start, tz) {
                0 => return Err(ConversionError::MalformedYear { year, lunations }),
                off => Some(off as i32),
            },
            _ => return Err(ConversionError::MalformedYear { year, lunations }),
        };

        let mut months = Vec::with_capacity(lunations as usize + 1);
        for i in 0..lunations {
            let (num, is_leap) = match leap_offset {
                Some(off) if i >= off => (i + 10, i == off),
                _ => (i + 11, false),
            };
            months.push(NewMoon {
                month: Month::new((num as u32 - 1) % 12 + 1, is_leap),
                date: new_moon_day(k + i, tz),
            });
        }
        months.push(NewMoon {
            month: Month::Common(11),
            date: new_moon_day(k + lunations, tz),
        });
        if months[0].date != start || months[lunations as usize].date != end {
            return Err(ConversionError::MalformedYear { year, lunations });
        }

        debug!(
            year,
            tz = tz.hours(),
            start = %start,
            end = %end,
            leap_offset,
            "laid out lunar year"
        );
        Ok(LunarYear {
            year,
            time_zone: tz,
            months,
        })
    }

    /// Finds the lunar year holding `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::lunar::LunarYear;
    /// use amlich::time_scales::TimeZone;
    ///
    /// let date = Date::from_calendar(2025, 12, 31).unwrap();
    /// let year = LunarYear::from_date(date, TimeZone::VIETNAM).unwrap();
    ///
    /// assert_eq!(2026, year.year);
    /// ```
    pub fn from_date(date: Date, tz: TimeZone) -> Result<Self, ConversionError> {
        let mut y = date.calendar().year;
        loop {
            let year = Self::new(y, tz)?;
            match year.position_of(date) {
                None => return Ok(year),
                Some(OtherYear::Before) => y -= 1,
                Some(OtherYear::After) => y += 1,
            }
        }
    }

    /// First day of month 11 of the previous solar year.
    pub fn start(&self) -> Date {
        self.months[0].date
    }
    /// First day of the next lunar year's month 11, the day after this span.
    pub fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }

    fn position_of(&self, date: Date) -> Option<OtherYear> {
        if date < self.start() {
            Some(OtherYear::Before)
        } else if date >= self.end() {
            Some(OtherYear::After)
        } else {
            None
        }
    }

    /// Number of the leap month, if the year has one.
    pub fn leap_month(&self) -> Option<u32> {
        self.months
            .iter()
            .find(|m| m.month.is_leap())
            .map(|m| m.month.num())
    }

    /// Number of days (29 or 30) in `month`, `None` if the year has no such
    /// month.
    pub fn month_len(&self, month: Month) -> Option<u32> {
        let idx = self.month_index(month)?;
        Some((self.months[idx + 1].date - self.months[idx].date) as u32)
    }

    fn month_index(&self, month: Month) -> Option<usize> {
        self.months[..self.months.len() - 1]
            .iter()
            .position(|m| m.month == month)
    }

    /// Lunar date of `date` in this year.
    ///
    /// Returns `Err` if the date lies outside the year, telling on which
    /// side.
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherYear> {
        if let Some(other) = self.position_of(date) {
            return Err(other);
        }
        let m = self
            .months
            .iter()
            .take_while(|m| m.date <= date)
            .last()
            .ok_or(OtherYear::Before)?;
        let day = (date - m.date + 1) as u32;
        let year = if m.month.num() >= 11 {
            self.year - 1
        } else {
            self.year
        };
        Ok(LunarDate::new(year, m.month, day))
    }

    /// The date of `day` in `month` of this year.
    ///
    /// Months 11 and 12 are the ones at the start of the span, belonging to
    /// lunar year `self.year - 1`.
    pub fn date_for(&self, month: Month, day: u32) -> Result<Date, ConversionError> {
        let num = month.num();
        if !(1..=12).contains(&num) {
            return Err(ConversionError::InvalidMonth { month: num });
        }
        let label_year = if num >= 11 { self.year - 1 } else { self.year };
        let idx = self
            .month_index(month)
            .ok_or(ConversionError::NoSuchLeapMonth {
                year: label_year,
                month: num,
            })?;
        let start = self.months[idx].date;
        let max_day = (self.months[idx + 1].date - start) as u32;
        if day == 0 || day > max_day {
            return Err(ConversionError::InvalidLunarDay {
                day,
                month: num,
                max_day,
            });
        }
        Ok(start + (day as i32 - 1))
    }
}

/// Converts a solar date into the lunar calendar of time zone `tz`.
///
/// # Example
///
/// ```
/// use amlich::{LunarDate, Month, TimeZone, solar_to_lunar};
///
/// // Tết Nguyên Đán 2025
/// let tet = solar_to_lunar(29, 1, 2025, TimeZone::VIETNAM).unwrap();
/// assert_eq!(LunarDate::new(2025, Month::Common(1), 1), tet);
/// ```
pub fn solar_to_lunar(
    day: u32,
    month: u32,
    year: i32,
    tz: TimeZone,
) -> Result<LunarDate, ConversionError> {
    let date = Date::from_calendar(year, month, day)?;
    let mut y = year;
    loop {
        match LunarYear::new(y, tz)?.ymd_for(date) {
            Ok(lunar) => return Ok(lunar),
            Err(OtherYear::Before) => y -= 1,
            Err(OtherYear::After) => y += 1,
        }
    }
}

/// Converts a lunar date of time zone `tz` into a solar date.
///
/// # Errors
///
/// Rejects months outside `1..=12`, days beyond the length of the lunar
/// month, and `is_leap` for a month that is not leap in that year. Lunar
/// years whose dates fall outside [`MIN_YEAR`]`..=`[`MAX_YEAR`] are
/// [`ConversionError::YearOutOfRange`].
///
/// # Example
///
/// ```
/// use amlich::{SolarDate, TimeZone, lunar_to_solar};
///
/// // 1st day of leap 6th month, 2025
/// let date = lunar_to_solar(1, 6, 2025, true, TimeZone::VIETNAM).unwrap();
/// assert_eq!(SolarDate::new(2025, 7, 25), date);
/// ```
pub fn lunar_to_solar(
    day: u32,
    month: u32,
    year: i32,
    is_leap: bool,
    tz: TimeZone,
) -> Result<SolarDate, ConversionError> {
    if !(MIN_YEAR - 1..=MAX_YEAR).contains(&year) {
        return Err(ConversionError::YearOutOfRange { year });
    }
    if !(1..=12).contains(&month) {
        return Err(ConversionError::InvalidMonth { month });
    }
    if !(1..=30).contains(&day) {
        return Err(ConversionError::InvalidLunarDay {
            day,
            month,
            max_day: 30,
        });
    }
    let span = if month >= 11 { year + 1 } else { year };
    let lunar_year = LunarYear::new(span, tz)?;
    let solar = lunar_year
        .date_for(Month::new(month, is_leap), day)?
        .calendar();
    if !(MIN_YEAR..=MAX_YEAR).contains(&solar.year) {
        return Err(ConversionError::YearOutOfRange { year: solar.year });
    }
    Ok(solar)
}
