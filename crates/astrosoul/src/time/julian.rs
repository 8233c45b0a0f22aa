//! Julian Day numbers for UTC calendar instants.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Julian Day of J2000.0 (2000-01-01 12:00 UT).
pub const J2000: f64 = 2_451_545.0;

/// Julian Day for a Gregorian calendar date and fractional UT hour.
///
/// Day boundaries fall at noon UT. Uses the Meeus formulation with the
/// century-based Gregorian leap correction.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}

/// Fractional hour-of-day, including sub-second precision.
pub fn decimal_hour(dt: &NaiveDateTime) -> f64 {
    let seconds = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    dt.hour() as f64 + dt.minute() as f64 / 60.0 + seconds / 3600.0
}

/// Julian Day for a UTC timestamp.
pub fn julian_day_from_utc(utc: &NaiveDateTime) -> f64 {
    julian_day(utc.year(), utc.month(), utc.day(), decimal_hour(utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_j2000_epoch() {
        assert_abs_diff_eq!(julian_day(2000, 1, 1, 12.0), J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_day_boundary_is_noon() {
        let midnight = julian_day(2000, 1, 1, 0.0);
        assert_abs_diff_eq!(midnight, 2_451_544.5, epsilon = 1e-9);
    }

    #[test]
    fn test_january_february_use_previous_year() {
        // 1987-01-27 00:00 and 1988-06-19 12:00 from Meeus, chapter 7.
        assert_abs_diff_eq!(julian_day(1987, 1, 27, 0.0), 2_446_822.5, epsilon = 1e-9);
        assert_abs_diff_eq!(julian_day(1988, 6, 19, 12.0), 2_447_332.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_seconds_are_kept() {
        let dt = NaiveDate::from_ymd_opt(2004, 2, 12)
            .unwrap()
            .and_hms_milli_opt(5, 55, 30, 500)
            .unwrap();
        let expected = 5.0 + 55.0 / 60.0 + 30.5 / 3600.0;
        assert_abs_diff_eq!(decimal_hour(&dt), expected, epsilon = 1e-12);
    }
}
