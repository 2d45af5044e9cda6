//! Astronomical computations the calendar is built on: solar longitude, new
//! moons, the month-11 anchor and leap month placement.
//!
//! Solar longitude follows the low-precision series of Meeus, *Astronomical
//! Algorithms*, ch. 25; new moons follow ch. 49 of the same book. Both are
//! good to well under a minute of time over 1900–2100.

use std::f64::consts::PI;

use tracing::{trace, warn};

use crate::date::Date;
use crate::error::ConversionError;
use crate::time_scales::{TimeZone, Tt, Ut};

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Solar longitude at the winter solstice, which month 11 must contain.
const WINTER_SOLSTICE: f64 = 270.0;

/// Mean epoch of the new moon with lunation index 0 (2000-01-06).
const LUNATION_EPOCH: f64 = 2451550.09766;

/// Lunations from the first month-11 candidate through the last one checked.
const MONTH_11_SCAN: i32 = 17;

/// Lunations examined after month 11 when looking for the leap month.
const LEAP_SCAN: u32 = 14;

fn sin_deg(deg: f64) -> f64 {
    (deg * PI / 180.0).sin()
}

fn normalize_degrees(deg: f64) -> f64 {
    let deg = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to 360.0
    if deg >= 360.0 { 0.0 } else { deg }
}

/// Apparent ecliptic longitude of the sun, in degrees within `[0, 360)`.
///
/// `jd` is a Julian date reckoned in local time of `tz`.
///
/// # Example
///
/// ```
/// use amlich::lunar::ephemeris::sun_longitude;
/// use amlich::time_scales::TimeZone;
///
/// let lon = sun_longitude(2451545.0, TimeZone::UTC);
/// assert!((lon - 280.38).abs() < 0.01);
/// ```
pub fn sun_longitude(jd: f64, tz: TimeZone) -> f64 {
    let t = (jd - 2451545.0 - tz.days()) / 36525.0;
    let t2 = t * t;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let c = (1.914600 - 0.004817 * t - 0.000014 * t2) * sin_deg(m)
        + (0.019993 - 0.000101 * t) * sin_deg(2.0 * m)
        + 0.000290 * sin_deg(3.0 * m);
    normalize_degrees(l0 + c)
}

/// Solar longitude at local midnight starting `date`.
pub(crate) fn sun_longitude_at_start(date: Date, tz: TimeZone) -> f64 {
    sun_longitude(date.jdn() as f64 - 0.5, tz)
}

/// The 30° sector (`0..12`) holding the sun at the start of `date`.
fn principal_sector(date: Date, tz: TimeZone) -> i32 {
    (sun_longitude_at_start(date, tz) / 30.0).floor() as i32
}

/// Time of the `k`-th new moon counted from the one of 2000-01-06.
///
/// Negative `k` gives earlier new moons.
pub fn new_moon(k: i32) -> Tt {
    let k = k as f64;
    let t = k / 1236.85;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let jde = LUNATION_EPOCH + 29.530588861 * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = 2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3;
    let mp = 201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3 - 0.000000058 * t4;
    let f = 160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3 + 0.000000011 * t4;
    let omega = 124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3;

    let periodic = -0.40720 * sin_deg(mp)
        + 0.17241 * e * sin_deg(m)
        + 0.01608 * sin_deg(2.0 * mp)
        + 0.01039 * sin_deg(2.0 * f)
        + 0.00739 * e * sin_deg(mp - m)
        - 0.00514 * e * sin_deg(mp + m)
        + 0.00208 * e * e * sin_deg(2.0 * m)
        - 0.00111 * sin_deg(mp - 2.0 * f)
        - 0.00057 * sin_deg(mp + 2.0 * f)
        + 0.00056 * e * sin_deg(2.0 * mp + m)
        - 0.00042 * sin_deg(3.0 * mp)
        + 0.00042 * e * sin_deg(m + 2.0 * f)
        + 0.00038 * e * sin_deg(m - 2.0 * f)
        - 0.00024 * e * sin_deg(2.0 * mp - m)
        - 0.00017 * sin_deg(omega)
        - 0.00007 * sin_deg(mp + 2.0 * m)
        + 0.00004 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.00004 * sin_deg(3.0 * m)
        + 0.00003 * sin_deg(mp + m - 2.0 * f)
        + 0.00003 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.00003 * sin_deg(mp + m + 2.0 * f)
        + 0.00003 * sin_deg(mp - m + 2.0 * f)
        - 0.00002 * sin_deg(mp - m - 2.0 * f)
        - 0.00002 * sin_deg(3.0 * mp + m)
        + 0.00002 * sin_deg(4.0 * mp);

    // (argument at k = 0, rate per lunation, coefficient)
    const PLANETARY: [(f64, f64, f64); 14] = [
        (299.77, 0.107408, 0.000325),
        (251.88, 0.016321, 0.000165),
        (251.83, 26.651886, 0.000164),
        (349.42, 36.412478, 0.000126),
        (84.66, 18.206239, 0.000110),
        (141.74, 53.303771, 0.000062),
        (207.14, 2.453732, 0.000060),
        (154.84, 7.306860, 0.000056),
        (34.52, 27.261239, 0.000047),
        (207.19, 0.121824, 0.000042),
        (291.34, 1.844379, 0.000040),
        (161.72, 24.198154, 0.000037),
        (239.56, 25.513099, 0.000035),
        (331.55, 3.592518, 0.000023),
    ];
    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(a0, rate, coef))| {
            let secular = if i == 0 { -0.009173 * t2 } else { 0.0 };
            coef * sin_deg(a0 + rate * k + secular)
        })
        .sum();

    Tt(jde + periodic + planetary)
}

/// Local date of the `k`-th new moon in time zone `tz`.
///
/// # Example
///
/// ```
/// use amlich::lunar::ephemeris::new_moon_day;
/// use amlich::time_scales::TimeZone;
///
/// // 2000-01-06 18:14 UTC is already the 7th at UTC+7
/// assert_eq!("2000-01-06", new_moon_day(0, TimeZone::UTC).to_string());
/// assert_eq!("2000-01-07", new_moon_day(0, TimeZone::VIETNAM).to_string());
/// ```
pub fn new_moon_day(k: i32, tz: TimeZone) -> Date {
    Ut::from(new_moon(k)).date_in_timezone(tz)
}

/// Lunation index of the new moon falling on or nearest to `date`.
pub fn lunation_index(date: Date) -> i32 {
    ((date.jdn() as f64 - LUNATION_EPOCH) / SYNODIC_MONTH).round() as i32
}

/// Finds the new moon starting month 11 of the lunar year that leads into
/// solar year `year`, i.e. the month holding the winter solstice of
/// `year - 1`.
///
/// Month 11 starts on the last new moon day whose start still has the sun
/// short of 270°.
///
/// # Errors
///
/// [`ConversionError::AnchorNotFound`] if the bounded scan finds no such new
/// moon, or if `year` is so far out that its lunation indices overflow.
///
/// # Example
///
/// ```
/// use amlich::lunar::ephemeris::lunar_month_11;
/// use amlich::time_scales::TimeZone;
///
/// let m11 = lunar_month_11(2025, TimeZone::VIETNAM).unwrap();
/// assert_eq!("2024-12-01", m11.to_string());
/// ```
pub fn lunar_month_11(year: i32, tz: TimeZone) -> Result<Date, ConversionError> {
    let k_start = ((year as f64 - 2000.0) * 12.3685).floor() - 5.0;
    if k_start < i32::MIN as f64 || k_start > (i32::MAX - MONTH_11_SCAN) as f64 {
        warn!(year, "lunation index out of range");
        return Err(ConversionError::AnchorNotFound { year });
    }
    let k_start = k_start as i32;
    let mut prev: Option<(Date, f64)> = None;
    for k in k_start..=k_start + MONTH_11_SCAN {
        let nm = new_moon_day(k, tz);
        let lon = sun_longitude_at_start(nm, tz);
        if let Some((nm_prev, lon_prev)) = prev {
            if nm > nm_prev
                && (180.0..WINTER_SOLSTICE).contains(&lon_prev)
                && lon >= WINTER_SOLSTICE
            {
                trace!(year, k = k - 1, month_11 = %nm_prev, "found month 11");
                return Ok(nm_prev);
            }
        }
        prev = Some((nm, lon));
    }
    warn!(year, tz = tz.hours(), "month-11 scan exhausted");
    Err(ConversionError::AnchorNotFound { year })
}

/// Offset from month 11 of the leap month in the lunar year starting at
/// `month_11`, or 0 if none of the next 14 lunations lacks a principal term.
///
/// The leap month is the first one whose start and end fall in the same 30°
/// sector of solar longitude.
///
/// # Example
///
/// ```
/// use amlich::lunar::ephemeris::{leap_month_offset, lunar_month_11};
/// use amlich::time_scales::TimeZone;
///
/// let tz = TimeZone::VIETNAM;
/// // 2025 has a leap 6th month: 11, 12, 1, .., 6, leap 6
/// let m11 = lunar_month_11(2025, tz).unwrap();
/// assert_eq!(8, leap_month_offset(m11, tz));
/// ```
pub fn leap_month_offset(month_11: Date, tz: TimeZone) -> u32 {
    let k = lunation_index(month_11);
    let mut last = principal_sector(new_moon_day(k + 1, tz), tz);
    for i in 2..=LEAP_SCAN {
        let sector = principal_sector(new_moon_day(k + i as i32, tz), tz);
        if sector == last {
            trace!(month_11 = %month_11, offset = i - 1, sector, "found leap month");
            return i - 1;
        }
        last = sector;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TZ: TimeZone = TimeZone::VIETNAM;

    #[test]
    fn sun_longitude_range() {
        let start = Date::from_calendar(1900, 1, 1).unwrap().jdn();
        for jdn in (start..start + 200 * 366).step_by(7) {
            let lon = sun_longitude(jdn as f64, TZ);
            assert!((0.0..360.0).contains(&lon), "{jdn}: {lon}");
        }
    }

    #[test]
    fn sun_longitude_yearly_period() {
        for jd in [2415020.5, 2440000.0, 2451545.0, 2460000.25, 2488000.0] {
            let a = sun_longitude(jd, TZ);
            let b = sun_longitude(jd + 365.25, TZ);
            let diff = (b - a + 180.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 0.3, "{jd}: {a} vs {b}");
        }
    }

    #[test]
    fn sun_longitude_timezone_shift() {
        assert_abs_diff_eq!(
            sun_longitude(2451545.0, TimeZone::UTC),
            sun_longitude(2451545.0 + 7.0 / 24.0, TZ),
            epsilon = 1e-9
        );
    }

    #[test]
    fn solstice_crossing() {
        // 2024-12-21 09:20 UTC, i.e. during the 21st at UTC+7
        let dec21 = Date::from_calendar(2024, 12, 21).unwrap();
        assert!(sun_longitude_at_start(dec21, TZ) < 270.0);
        assert!(sun_longitude_at_start(dec21 + 1, TZ) >= 270.0);
    }

    #[test]
    fn new_moons() {
        let data = [
            (0, "2000-01-07"),
            (-1, "1999-12-08"),
            (205, "2016-08-03"),
            (310, "2025-01-29"),
        ];
        for (k, std) in data {
            assert_eq!(std, new_moon_day(k, TZ).to_string(), "k = {k}");
        }
        // 2000-01-06 18:14 TT
        assert_abs_diff_eq!(2451550.26, new_moon(0).0, epsilon = 0.001);
    }

    #[test]
    fn lunation_index_inverts_new_moon_day() {
        for k in -1300..1300 {
            assert_eq!(k, lunation_index(new_moon_day(k, TZ)));
        }
    }

    #[test]
    fn month_11() {
        for (year, std) in [
            (2000, "1999-12-08"),
            (2017, "2016-11-29"),
            (2018, "2017-12-18"),
            (2024, "2023-12-13"),
            (2025, "2024-12-01"),
            (2026, "2025-12-20"),
            (2034, "2033-11-22"),
        ] {
            assert_eq!(std, lunar_month_11(year, TZ).unwrap().to_string());
        }
    }

    #[test]
    fn month_11_found_for_wide_range() {
        for year in 1800..=2200 {
            assert!(lunar_month_11(year, TZ).is_ok(), "{year}");
        }
    }

    #[test]
    fn month_11_not_found() {
        for year in [1_000_000, -1_000_000, i32::MAX, i32::MIN] {
            assert_eq!(
                Err(ConversionError::AnchorNotFound { year }),
                lunar_month_11(year, TZ)
            );
        }
    }

    #[test]
    fn leap_offsets() {
        for (year, std) in [(2000, 0), (2017, 8), (2018, 0), (2024, 0), (2025, 8), (2034, 1)] {
            let m11 = lunar_month_11(year, TZ).unwrap();
            assert_eq!(std, leap_month_offset(m11, TZ), "{year}");
        }
    }

    #[test]
    fn leap_offset_range() {
        for year in 1900..=2100 {
            let m11 = lunar_month_11(year, TZ).unwrap();
            assert!(leap_month_offset(m11, TZ) <= 13);
        }
    }
}
