//! Julian Date ↔ calendar conversions (proleptic Gregorian calendar).
//!
//! Algorithms after Meeus, *Astronomical Algorithms*, ch. 7.

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a calendar date to a Julian Date.
///
/// `day` carries the fraction of the day, so `calendar_to_jd(2000, 1, 1.5)`
/// is noon on 2000-Jan-01 (= [`J2000_JD`]).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = y as f64;
    let m = m as f64;

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Date to `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_from_calendar() {
        assert!((calendar_to_jd(2000, 1, 1.5) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957-Oct-04.81 (Sputnik 1)
        assert!((calendar_to_jd(1957, 10, 4.81) - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn january_and_february_use_previous_year() {
        assert!((calendar_to_jd(2024, 3, 1.0) - calendar_to_jd(2024, 2, 29.0) - 1.0).abs() < 1e-9);
        assert!((calendar_to_jd(2023, 3, 1.0) - calendar_to_jd(2023, 2, 28.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn calendar_from_jd() {
        let (y, m, d) = jd_to_calendar(2_436_116.31);
        assert_eq!(y, 1957);
        assert_eq!(m, 10);
        assert!((d - 4.81).abs() < 1e-6);
    }

    #[test]
    fn roundtrip_across_year_boundary() {
        let jd = calendar_to_jd(2019, 12, 31.999);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2019, 12));
        assert!((d - 31.999).abs() < 1e-6);
    }
}
