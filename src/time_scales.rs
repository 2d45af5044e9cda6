//! Time scales and local time zones.
//!
//! New moons come out of the lunar theory in terrestrial time (TT); the
//! calendar needs the civil date at a given offset from UTC. Only the
//! conversions needed for that are included.

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::ConversionError;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Ephemeris results such as [`new_moon`](crate::lunar::ephemeris::new_moon)
/// are in this time scale and must be converted to UT before taking a date.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the civil
/// time used for determining the date at a given time point, represented in
/// Julian date (JD).
///
/// UTC and UT1 are not told apart: they never differ by more than 0.9 s.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl From<Tt> for Ut {
    fn from(tt: Tt) -> Ut {
        Ut(tt.0 - delta_t::estimate(tt) / 86400.0)
    }
}

impl Ut {
    /// Returns the date at the time point in time zone `tz`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::{TimeZone, Ut};
    ///
    /// let ut = Ut(2451550.26);            // 2000-01-06 18:14 UTC
    /// assert_eq!(2451550, ut.date_in_timezone(TimeZone::UTC).jdn());
    /// assert_eq!(2451551, ut.date_in_timezone(TimeZone::VIETNAM).jdn());
    /// ```
    pub fn date_in_timezone(&self, tz: TimeZone) -> Date {
        Date::from_jdn((self.0 + tz.days() + 0.5).floor() as i32)
    }
}

/// A fixed offset east of UTC, in hours.
///
/// Fractional offsets such as UTC+5:30 are allowed. The default is UTC+7,
/// the offset of the Vietnamese calendar.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeZone(f64);

impl TimeZone {
    /// Coordinated universal time.
    pub const UTC: TimeZone = TimeZone(0.0);
    /// Indochina time (UTC+7), used by the Vietnamese calendar.
    pub const VIETNAM: TimeZone = TimeZone(7.0);
    /// China standard time (UTC+8), used by the Chinese calendar.
    pub const CHINA: TimeZone = TimeZone(8.0);
    /// Korea standard time (UTC+9), used by the Korean calendar.
    pub const KOREA: TimeZone = TimeZone(9.0);

    /// Creates an offset of `hours` east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidTimeZone`] unless `hours` is finite
    /// and within `-12..=14`.
    pub fn from_hours(hours: f64) -> Result<Self, ConversionError> {
        if hours.is_finite() && (-12.0..=14.0).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(ConversionError::InvalidTimeZone { hours })
        }
    }
    /// Offset in hours.
    pub fn hours(&self) -> f64 {
        self.0
    }
    /// Offset in days.
    pub fn days(&self) -> f64 {
        self.0 / 24.0
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::VIETNAM
    }
}

impl TryFrom<f64> for TimeZone {
    type Error = ConversionError;
    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
    }
}

impl From<TimeZone> for f64 {
    fn from(tz: TimeZone) -> f64 {
        tz.0
    }
}

mod delta_t {
    use super::Tt;

    /// Estimates ΔT = TT − UT in seconds.
    ///
    /// Piecewise polynomials of Espenak & Meeus (2006) between 1800 and 2150,
    /// the long-term parabola of Morrison & Stephenson outside.
    pub fn estimate(tt: Tt) -> f64 {
        let y = 2000.0 + (tt.0 - 2451545.0) / 365.25;
        let long_term = |y: f64| {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u
        };
        match y {
            y if y < 1800.0 => long_term(y),
            y if y < 1860.0 => {
                let t = y - 1800.0;
                13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
                    - 0.00037436 * t.powi(4)
                    + 0.0000121272 * t.powi(5)
                    - 0.0000001699 * t.powi(6)
                    + 0.000000000875 * t.powi(7)
            }
            y if y < 1900.0 => {
                let t = y - 1860.0;
                7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                    - 0.0004473624 * t.powi(4)
                    + t.powi(5) / 233174.0
            }
            y if y < 1920.0 => {
                let t = y - 1900.0;
                -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                    - 0.000197 * t.powi(4)
            }
            y if y < 1941.0 => {
                let t = y - 1920.0;
                21.20 + 0.84493 * t - 0.0761 * t.powi(2) + 0.0020936 * t.powi(3)
            }
            y if y < 1961.0 => {
                let t = y - 1950.0;
                29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
            }
            y if y < 1986.0 => {
                let t = y - 1975.0;
                45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
            }
            y if y < 2005.0 => {
                let t = y - 2000.0;
                63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                    + 0.0017275 * t.powi(3)
                    + 0.000651814 * t.powi(4)
                    + 0.00002373599 * t.powi(5)
            }
            y if y < 2050.0 => {
                let t = y - 2000.0;
                62.92 + 0.32217 * t + 0.005589 * t.powi(2)
            }
            y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
            y => long_term(y),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tt_to_ut() {
        // 2000-01-06 18:14 TT is about a minute earlier in UT
        let ut = Ut::from(Tt(2451550.26));
        assert!((ut.0 - (2451550.26 - 63.86 / 86400.0)).abs() < 1e-6);
        assert_eq!(2451550, ut.date_in_timezone(TimeZone::UTC).jdn());
        assert_eq!(2451551, ut.date_in_timezone(TimeZone::VIETNAM).jdn());
    }

    #[test]
    fn date_boundary_in_timezone() {
        // 16:59:59 UTC is still the same day at UTC+7, 17:00 is the next
        let midnight = Ut(2451545.0 + 5.0 / 24.0);
        let before = Ut(midnight.0 - 1.0 / 86400.0);
        assert_eq!(2451545, before.date_in_timezone(TimeZone::VIETNAM).jdn());
        assert_eq!(2451546, midnight.date_in_timezone(TimeZone::VIETNAM).jdn());
    }

    #[test]
    fn timezone_validation() {
        assert_eq!(Ok(TimeZone::VIETNAM), TimeZone::from_hours(7.0));
        assert_eq!(5.5, TimeZone::from_hours(5.5).unwrap().hours());
        assert_eq!(
            Err(ConversionError::InvalidTimeZone { hours: 15.0 }),
            TimeZone::from_hours(15.0)
        );
        assert!(TimeZone::from_hours(f64::NAN).is_err());
        assert_eq!(TimeZone::VIETNAM, TimeZone::default());
    }
}
