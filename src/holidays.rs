//! Holidays fixed in either the solar or the lunar calendar, and when they
//! next fall.

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::ConversionError;
use crate::lunar::{LunarYear, Month};
use crate::time_scales::TimeZone;

/// Which calendar a holiday's month and day are counted in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    /// Gregorian (Julian before 1582-10-15)
    Solar,
    /// Vietnamese lunisolar
    Lunar,
}

/// A yearly holiday.
///
/// Lunar holidays always fall in an ordinary (non-leap) month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Holiday {
    /// Short machine-readable key, e.g. `tet`
    pub id: String,
    /// Display name
    pub title: String,
    /// Calendar the month and day are counted in
    pub calendar: CalendarKind,
    /// Month number, 1 to 12
    pub month: u32,
    /// Day of the month
    pub day: u32,
}

/// Years searched ahead for the next occurrence, enough to reach a
/// February 29 across a skipped century leap day.
const SEARCH_YEARS: i32 = 9;

impl Holiday {
    /// A holiday on a fixed solar date.
    pub fn solar(id: &str, title: &str, month: u32, day: u32) -> Self {
        Self::new(id, title, CalendarKind::Solar, month, day)
    }
    /// A holiday on a fixed day of an ordinary lunar month.
    pub fn lunar(id: &str, title: &str, month: u32, day: u32) -> Self {
        Self::new(id, title, CalendarKind::Lunar, month, day)
    }
    fn new(id: &str, title: &str, calendar: CalendarKind, month: u32, day: u32) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            calendar,
            month,
            day,
        }
    }

    /// Checks that the month and day can occur at all.
    pub fn validate(&self) -> Result<(), ConversionError> {
        match self.calendar {
            // 2000 is a leap year in either calendar
            CalendarKind::Solar => Date::from_calendar(2000, self.month, self.day).map(|_| ()),
            CalendarKind::Lunar if !(1..=12).contains(&self.month) => {
                Err(ConversionError::InvalidMonth { month: self.month })
            }
            CalendarKind::Lunar if !(1..=30).contains(&self.day) => {
                Err(ConversionError::InvalidLunarDay {
                    day: self.day,
                    month: self.month,
                    max_day: 30,
                })
            }
            CalendarKind::Lunar => Ok(()),
        }
    }

    /// The date of the holiday in `year`, a solar year or a lunar year
    /// depending on the holiday.
    ///
    /// A lunar day 30 falls on day 29 in a short month.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::holidays::Holiday;
    /// use amlich::time_scales::TimeZone;
    ///
    /// let hung_kings = Holiday::lunar("hung-kings", "Giỗ Tổ Hùng Vương", 3, 10);
    /// let date = hung_kings.occurrence(2025, TimeZone::VIETNAM).unwrap();
    ///
    /// assert_eq!("2025-04-07", date.to_string());
    /// ```
    pub fn occurrence(&self, year: i32, tz: TimeZone) -> Result<Date, ConversionError> {
        match self.calendar {
            CalendarKind::Solar => Date::from_calendar(year, self.month, self.day),
            CalendarKind::Lunar => {
                self.validate()?;
                let span = if self.month >= 11 { year + 1 } else { year };
                let lunar_year = LunarYear::new(span, tz)?;
                let month = Month::Common(self.month);
                let len = lunar_year
                    .month_len(month)
                    .ok_or(ConversionError::InvalidMonth { month: self.month })?;
                lunar_year.date_for(month, self.day.min(len))
            }
        }
    }

    /// First occurrence on or after `from`.
    pub fn next_occurrence(&self, from: Date, tz: TimeZone) -> Result<Date, ConversionError> {
        self.validate()?;
        let first = match self.calendar {
            CalendarKind::Solar => from.calendar().year,
            CalendarKind::Lunar => {
                let lunar_year = LunarYear::from_date(from, tz)?;
                lunar_year
                    .ymd_for(from)
                    .map_or(lunar_year.year, |date| date.year)
            }
        };
        let mut last_err = None;
        for year in first..first + SEARCH_YEARS {
            match self.occurrence(year, tz) {
                Ok(date) if date >= from => return Ok(date),
                Ok(_) => {}
                // February 29 in a common year
                Err(err @ ConversionError::InvalidDay { .. }) => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or(ConversionError::YearOutOfRange {
            year: first + SEARCH_YEARS,
        }))
    }

    /// Days from `from` until the next occurrence, 0 on the day itself.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::holidays::Holiday;
    /// use amlich::time_scales::TimeZone;
    ///
    /// let tet = Holiday::lunar("tet", "Tết Nguyên Đán", 1, 1);
    /// let from = Date::from_calendar(2025, 10, 19).unwrap();
    ///
    /// assert_eq!(Ok(121), tet.days_until(from, TimeZone::VIETNAM));
    /// ```
    pub fn days_until(&self, from: Date, tz: TimeZone) -> Result<i32, ConversionError> {
        Ok(self.next_occurrence(from, tz)? - from)
    }
}

/// National holidays and the main traditional festivals of Vietnam.
pub fn default_holidays() -> Vec<Holiday> {
    vec![
        Holiday::solar("new-year", "Tết Dương lịch", 1, 1),
        Holiday::lunar("tet", "Tết Nguyên Đán", 1, 1),
        Holiday::lunar("hung-kings", "Giỗ Tổ Hùng Vương", 3, 10),
        Holiday::solar("reunification", "Ngày Giải phóng miền Nam", 4, 30),
        Holiday::solar("national-day", "Quốc khánh", 9, 2),
        Holiday::lunar("mid-autumn", "Tết Trung Thu", 8, 15),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: TimeZone = TimeZone::VIETNAM;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_calendar(y, m, d).unwrap()
    }

    #[test]
    fn next_occurrences() {
        let from = date(2025, 10, 19);
        let stds = [
            ("new-year", "2026-01-01"),
            ("tet", "2026-02-17"),
            ("hung-kings", "2026-04-26"),
            ("reunification", "2026-04-30"),
            ("national-day", "2026-09-02"),
            ("mid-autumn", "2026-09-25"),
        ];
        let holidays = default_holidays();
        assert_eq!(stds.len(), holidays.len());
        for ((id, std), holiday) in stds.into_iter().zip(&holidays) {
            assert_eq!(id, holiday.id);
            assert_eq!(
                std,
                holiday.next_occurrence(from, TZ).unwrap().to_string(),
                "{id}"
            );
        }
    }

    #[test]
    fn occurrence_today_counts() {
        let tet = Holiday::lunar("tet", "Tết Nguyên Đán", 1, 1);
        assert_eq!(Ok(0), tet.days_until(date(2025, 1, 29), TZ));
        assert_eq!(Ok(date(2026, 2, 17)), tet.next_occurrence(date(2025, 1, 30), TZ));
    }

    #[test]
    fn lunar_day_30_in_short_month() {
        // month 12 of 2024 has 29 days
        let eve = Holiday::lunar("tat-nien", "Tất niên", 12, 30);
        assert_eq!(Ok(date(2025, 1, 28)), eve.occurrence(2024, TZ));
    }

    #[test]
    fn leap_day_skips_common_years() {
        let leap_day = Holiday::solar("leap-day", "Leap day", 2, 29);
        assert_eq!(
            Ok(date(2104, 2, 29)),
            leap_day.next_occurrence(date(2096, 3, 1), TZ)
        );
    }

    #[test]
    fn validation() {
        assert!(default_holidays().iter().all(|h| h.validate().is_ok()));
        assert_eq!(
            Err(ConversionError::InvalidDay {
                day: 30,
                month: 2,
                max_day: 29
            }),
            Holiday::solar("x", "x", 2, 30).validate()
        );
        assert_eq!(
            Err(ConversionError::InvalidMonth { month: 13 }),
            Holiday::lunar("x", "x", 13, 1).validate()
        );
    }
}
