//! Error types for calendar conversion.

/// Error type for all fallible conversions in this crate.
///
/// A conversion either succeeds completely or returns one of these; no
/// partially computed date is ever handed back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A month number outside `1..=12`.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The month number that was provided.
        month: u32,
    },

    /// A day number outside the valid range for its month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The day number that was provided.
        day: u32,
        /// The month the day was checked against.
        month: u32,
        /// Number of days in that month.
        max_day: u32,
    },

    /// A date skipped by the Gregorian reform (1582-10-05 through 1582-10-14).
    #[error("{year:04}-{month:02}-{day:02} does not exist in the civil calendar")]
    NonexistentDate {
        /// Year of the skipped date.
        year: i32,
        /// Month of the skipped date.
        month: u32,
        /// Day of the skipped date.
        day: u32,
    },

    /// Text that is not a `YYYY-MM-DD` date.
    #[error("cannot parse {input:?} as YYYY-MM-DD")]
    Unparsable {
        /// The rejected text.
        input: String,
    },

    /// A year outside `-4712..=9999`.
    #[error("year {year} out of supported range -4712..=9999")]
    YearOutOfRange {
        /// The year that was provided.
        year: i32,
    },

    /// A time zone offset that is not finite or lies outside `-12..=14` hours.
    #[error("invalid time zone offset: {hours} hours")]
    InvalidTimeZone {
        /// The offset in hours east of UTC.
        hours: f64,
    },

    /// The month-11 scan found no new moon before the winter solstice.
    #[error("no month-11 new moon found for year {year}")]
    AnchorNotFound {
        /// The solar year whose anchor was requested.
        year: i32,
    },

    /// The span between two month-11 new moons is not a valid lunar year.
    #[error("lunar year {year} spans {lunations} lunations")]
    MalformedYear {
        /// The lunar year being laid out.
        year: i32,
        /// Number of lunations found between the anchors; 13 also when no
        /// leap month could be placed.
        lunations: i32,
    },

    /// A leap month was requested that the lunar year does not have.
    #[error("lunar year {year} has no leap month {month}")]
    NoSuchLeapMonth {
        /// The lunar year.
        year: i32,
        /// The requested month label.
        month: u32,
    },

    /// A lunar day beyond the length of its month (29 or 30 days).
    #[error("invalid lunar day: {day} for month {month} (max {max_day})")]
    InvalidLunarDay {
        /// The day number that was provided.
        day: u32,
        /// The month label.
        month: u32,
        /// Number of days in that lunar month.
        max_day: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = ConversionError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_invalid_day() {
        let err = ConversionError::InvalidDay {
            day: 29,
            month: 2,
            max_day: 28,
        };
        assert_eq!(err.to_string(), "invalid day: 29 for month 2 (max 28)");
    }

    #[test]
    fn error_nonexistent_date() {
        let err = ConversionError::NonexistentDate {
            year: 1582,
            month: 10,
            day: 10,
        };
        assert_eq!(
            err.to_string(),
            "1582-10-10 does not exist in the civil calendar"
        );
    }

    #[test]
    fn error_malformed_year() {
        let err = ConversionError::MalformedYear {
            year: 2026,
            lunations: 25,
        };
        assert_eq!(err.to_string(), "lunar year 2026 spans 25 lunations");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<ConversionError>();
    }
}
