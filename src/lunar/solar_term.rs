//! Solar terms (tiết khí), the 24 divisions of the sun's path.

use crate::date::Date;
use crate::time_scales::TimeZone;

use super::ephemeris::sun_longitude_at_start;

/// The solar term in effect on a date.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SolarTerm {
    /// `1..=24`, from Lập xuân (315°) to Đại hàn (300°)
    pub term: u32,
    /// Days since the term began, 0 on the day it begins
    pub days_since: u32,
}

/// Upper bound on the length of a term; the longest lasts under 16 days.
const MAX_TERM_DAYS: u32 = 16;

/// 15° sector of the sun at the end of `date`.
fn term_sector(date: Date, tz: TimeZone) -> i32 {
    (sun_longitude_at_start(date + 1, tz) / 15.0).floor() as i32
}

/// Solar term in effect on `date`, a term beginning during the day counting
/// as in effect.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::lunar::solar_term_for;
/// use amlich::time_scales::TimeZone;
///
/// let date = Date::from_calendar(2024, 12, 21).unwrap();
/// let term = solar_term_for(date, TimeZone::VIETNAM);
///
/// assert_eq!((22, 0), (term.term, term.days_since)); // Đông chí
/// ```
pub fn solar_term_for(date: Date, tz: TimeZone) -> SolarTerm {
    let sector = term_sector(date, tz);
    let mut days_since = 0;
    while days_since < MAX_TERM_DAYS && term_sector(date - (days_since as i32 + 1), tz) == sector {
        days_since += 1;
    }
    SolarTerm {
        term: (sector - 21).rem_euclid(24) as u32 + 1,
        days_since,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_terms() {
        let dataset = [
            ((2024, 12, 5), (20, 13)),
            ((2024, 12, 6), (21, 0)),
            ((2024, 12, 7), (21, 1)),
            ((2024, 12, 20), (21, 14)),
            ((2024, 12, 21), (22, 0)),
            ((2024, 12, 22), (22, 1)),
            ((2025, 2, 3), (1, 0)),
            ((2025, 3, 20), (4, 0)),
        ];
        for ((y, m, d), (term, days_since)) in dataset {
            let date = Date::from_calendar(y, m, d).unwrap();
            assert_eq!(
                SolarTerm { term, days_since },
                solar_term_for(date, TimeZone::VIETNAM),
                "{y:04}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn every_term_once_a_year() {
        let mut date = Date::from_calendar(2023, 1, 1).unwrap();
        let mut starts = Vec::new();
        for _ in 0..365 {
            let term = solar_term_for(date, TimeZone::VIETNAM);
            if term.days_since == 0 {
                starts.push(term.term);
            }
            date = date + 1;
        }
        starts.sort_unstable();
        assert_eq!((1..=24).collect::<Vec<_>>(), starts);
    }
}
